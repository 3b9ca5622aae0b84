// SPDX-License-Identifier: AGPL-3.0
// Photo Share CLI - Folder backed share surface
//
// "Sharing" an album writes its images and caption into a fresh folder named
// after the recipient. Later albums for the same name get a numeric suffix.

use async_trait::async_trait;
use photo_share_core::{ShareOutcome, ShareRequest, ShareSurface};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub struct FolderShareSurface {
    out_dir: PathBuf,
    confirm: bool,
}

impl FolderShareSurface {
    pub fn new(out_dir: impl Into<PathBuf>, confirm: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            confirm,
        }
    }

    /// Create a folder no earlier album has used: `Ana`, then `Ana-2`, `Ana-3`...
    async fn claim_album_dir(&self, recipient_name: &str) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.out_dir).await?;
        let base = folder_name(recipient_name);
        let mut n = 1;
        loop {
            let name = if n == 1 {
                base.clone()
            } else {
                format!("{}-{}", base, n)
            };
            let dir = self.out_dir.join(name);
            match tokio::fs::create_dir(&dir).await {
                Ok(()) => return Ok(dir),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => n += 1,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Recipient name made safe for use as a single path component
fn folder_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == ' ' || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "recipient".to_string()
    } else {
        cleaned
    }
}

fn extension_for(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => "png",
        Ok(image::ImageFormat::Jpeg) => "jpg",
        _ => "bin",
    }
}

/// Blocking yes/no question on the terminal; anything but "y" declines
fn ask(question: String) -> bool {
    print!("{} [y/N] ", question);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

async fn write_album(dir: &Path, request: &ShareRequest) -> std::io::Result<()> {
    for (i, image) in request.images.iter().enumerate() {
        let file = dir.join(format!("photo-{:02}.{}", i + 1, extension_for(image)));
        tokio::fs::write(file, image).await?;
    }
    tokio::fs::write(dir.join("caption.txt"), &request.caption).await
}

#[async_trait]
impl ShareSurface for FolderShareSurface {
    async fn present(&self, request: ShareRequest) -> ShareOutcome {
        if self.confirm {
            let question = format!(
                "Share {} photos with {}?",
                request.images.len(),
                request.recipient_name
            );
            match tokio::task::spawn_blocking(move || ask(question)).await {
                Ok(true) => {}
                Ok(false) => return ShareOutcome::Cancelled,
                Err(e) => return ShareOutcome::Failed(e.to_string()),
            }
        }

        let written = match self.claim_album_dir(&request.recipient_name).await {
            Ok(dir) => write_album(&dir, &request).await.map(|()| dir),
            Err(e) => Err(e),
        };
        match written {
            Ok(dir) => {
                tracing::info!("Wrote {} images to {:?}", request.images.len(), dir);
                ShareOutcome::Delivered
            }
            Err(e) => ShareOutcome::Failed(e.to_string()),
        }
    }
}
