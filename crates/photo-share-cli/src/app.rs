// SPDX-License-Identifier: AGPL-3.0
// Photo Share CLI - Command handlers
//
// Drives the same view models a graphical frontend would, replaying scripted
// drags instead of touch input.

use crate::cli::{LibraryArgs, ShareArgs, ThemeCommand};
use crate::folder_library::FolderLibrary;
use crate::folder_share::FolderShareSurface;
use chrono::{Local, NaiveDate};
use photo_share_core::{
    AppError, DragTarget, PhotoAction, PhotoViewModel, PhotoViewer, SettingsStore, SharingAction,
    SharingStep, SharingViewModel, ThemeColors, ThemeViewModel, Vector2, ViewerEvent, Wizard,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] AppError),

    #[error("{0}")]
    Library(String),

    #[error("{0}")]
    Input(String),

    #[error("Sharing failed: {0}")]
    Share(String),
}

fn selected_date(args: &LibraryArgs) -> NaiveDate {
    args.date.unwrap_or_else(|| Local::now().date_naive())
}

async fn load_photos(args: &LibraryArgs) -> Result<(Arc<FolderLibrary>, PhotoViewModel), CliError> {
    let library = Arc::new(FolderLibrary::new(&args.library));
    let mut photos = PhotoViewModel::new(library.clone(), selected_date(args));
    photos.send(PhotoAction::RequestPermission).await;

    if let Some(message) = photos.state().error_message() {
        return Err(CliError::Library(message.to_string()));
    }
    Ok((library, photos))
}

pub async fn list_photos(args: LibraryArgs) -> Result<(), CliError> {
    let (_, photos) = load_photos(&args).await?;

    println!("{}: {} photos", photos.selected_date(), photos.photos().len());
    for (i, photo) in photos.photos().iter().enumerate() {
        println!(
            "  [{}] {}  {}",
            i,
            photo.captured_at.format("%H:%M:%S"),
            photo.asset_id().unwrap_or("(added)")
        );
    }
    Ok(())
}

pub async fn share(args: ShareArgs) -> Result<(), CliError> {
    let (library, photos) = load_photos(&args.library).await?;
    let surface = Arc::new(FolderShareSurface::new(&args.out, args.confirm));
    let mut sharing = SharingViewModel::with_share_delay(
        library,
        surface,
        Duration::from_millis(args.delay_ms),
    );
    let mut wizard = Wizard::new();
    sharing
        .send(SharingAction::CreateSession(photos.selected_date()))
        .await;

    report_step(&wizard, &photos, &sharing);
    if !wizard.next(&photos, &mut sharing) {
        return Err(CliError::Input(format!(
            "No photos on {} in {:?}",
            photos.selected_date(),
            args.library.library
        )));
    }

    for (direction, name) in args.recipients {
        sharing
            .send(SharingAction::AddRecipient { name, direction })
            .await;
        take_error(&sharing)?;
    }
    report_step(&wizard, &photos, &sharing);
    wizard.next(&photos, &mut sharing);

    for drag in args.drags {
        let photo = photos.photos().get(drag.photo_index).cloned().ok_or_else(|| {
            CliError::Input(format!("No photo at index {}", drag.photo_index))
        })?;
        sharing
            .send(SharingAction::StartDrag {
                photo,
                position: Vector2::ZERO,
            })
            .await;
        sharing.send(SharingAction::UpdateDrag(drag.offset)).await;

        let target = sharing.state().drag_state.target.unwrap_or(DragTarget::None);
        sharing.send(SharingAction::EndDrag(None)).await;

        match target {
            DragTarget::None => println!("  photo {} dropped outside any target", drag.photo_index),
            DragTarget::All => println!("  photo {} -> everyone", drag.photo_index),
            DragTarget::Direction(d) => println!("  photo {} -> {} {}", drag.photo_index, d.icon(), d),
        }
        if let Some(message) = sharing.state().error_message() {
            println!("  ! {}", message);
            sharing.send(SharingAction::ClearError).await;
        }
    }

    report_step(&wizard, &photos, &sharing);
    if !wizard.next(&photos, &mut sharing) {
        return Err(CliError::Input("No photos were distributed".to_string()));
    }
    report_step(&wizard, &photos, &sharing);

    if let Some(session) = sharing.session() {
        for album in session.albums() {
            println!(
                "  {} {}: {} photos",
                album.recipient.direction.icon(),
                album.recipient.name,
                album.photo_count()
            );
        }
    }

    sharing.send(SharingAction::ShareAlbums).await;
    if let Some(session) = sharing.session() {
        tracing::info!("Session finished with status {}", session.status.as_str());
    }
    match &sharing.state().last_result {
        Some(result) => {
            println!("{}", result.summary());
            for error in &result.errors {
                println!("  ! {}", error);
            }
            if result.successful == 0 {
                return Err(CliError::Share(result.summary()));
            }
            Ok(())
        }
        None => Err(CliError::Share(
            sharing
                .state()
                .error_message()
                .unwrap_or("Nothing was shared")
                .to_string(),
        )),
    }
}

fn take_error(sharing: &SharingViewModel) -> Result<(), CliError> {
    match sharing.state().error_message() {
        Some(message) => Err(CliError::Input(message.to_string())),
        None => Ok(()),
    }
}

fn report_step(wizard: &Wizard, photos: &PhotoViewModel, sharing: &SharingViewModel) {
    let step: SharingStep = wizard.step();
    println!(
        "[{}/{}] {}: {} ({})",
        step.index() + 1,
        SharingStep::ALL.len(),
        step.title(),
        wizard.completion_info(photos, sharing),
        step.next_button_title()
    );
}

pub async fn view(args: LibraryArgs, start: usize) -> Result<(), CliError> {
    let (library, photos) = load_photos(&args).await?;
    if photos.photos().is_empty() {
        println!("No photos on {}", photos.selected_date());
        return Ok(());
    }

    let mut viewer = PhotoViewer::open(library, photos.photos().to_vec(), start);
    loop {
        while viewer.displayed_image().is_none() {
            match viewer.next_event().await {
                Some(ViewerEvent::LoadFailed { asset_id, message }) => {
                    println!("  {} could not be loaded: {}", asset_id, message);
                    break;
                }
                Some(_) => {}
                None => break,
            }
        }

        let name = viewer
            .current()
            .and_then(|p| p.asset_id())
            .unwrap_or("(added)")
            .to_string();
        let size = viewer.displayed_image().map_or(0, |img| img.len());
        println!(
            "[{}/{}] {} ({} bytes, {} cached)",
            viewer.index() + 1,
            viewer.len(),
            name,
            size,
            viewer.cached_count()
        );

        if !viewer.next() {
            break;
        }
    }
    Ok(())
}

pub fn theme(config_dir: Option<PathBuf>, action: Option<ThemeCommand>) -> Result<(), CliError> {
    let store = match config_dir {
        Some(dir) => SettingsStore::in_dir(&dir)?,
        None => SettingsStore::new()?,
    };
    let mut vm = ThemeViewModel::new(Arc::new(store));

    match action.unwrap_or(ThemeCommand::Show) {
        ThemeCommand::List => {
            for theme in vm.available_themes() {
                let marker = if *theme == vm.current_theme() { "*" } else { " " };
                println!("{} {:<8} {}", marker, theme.as_str(), theme.display_name());
            }
        }
        ThemeCommand::Set { theme } => {
            vm.set_theme(theme)?;
            println!("Theme set to {}", theme.display_name());
        }
        ThemeCommand::Show => print_palette(vm.colors()),
    }
    Ok(())
}

fn print_palette(colors: &dyn ThemeColors) {
    println!("{}", colors.theme().display_name());
    let roles = [
        ("accent", colors.accent()),
        ("primary text", colors.primary_text()),
        ("secondary text", colors.secondary_text()),
        ("background", colors.background()),
        ("card", colors.card_background()),
        ("overlay", colors.overlay()),
        ("favorite", colors.favorite_active()),
        ("save", colors.save()),
        ("delete", colors.delete()),
        ("shadow", colors.shadow()),
    ];
    for (role, color) in roles {
        println!("  {:<15} {}", role, color);
    }
}
