// SPDX-License-Identifier: AGPL-3.0
// Photo Share CLI - Command line arguments

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use photo_share_core::{AppTheme, ShareDirection, Vector2};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "photo-share", version, about = "Share a day's photos by dragging them to people")]
pub struct Cli {
    /// Directory holding settings.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the photos taken on a day
    Photos(LibraryArgs),
    /// Distribute photos to recipients and share their albums
    Share(ShareArgs),
    /// Step through a day's photos at full resolution
    View {
        #[command(flatten)]
        library: LibraryArgs,
        /// Photo index to open on
        #[arg(long, default_value_t = 0)]
        start: usize,
    },
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
}

#[derive(Debug, Args)]
pub struct LibraryArgs {
    /// Folder of photos acting as the library
    #[arg(long)]
    pub library: PathBuf,

    /// Day to load, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct ShareArgs {
    #[command(flatten)]
    pub library: LibraryArgs,

    /// Folder receiving one sub-folder per recipient
    #[arg(long)]
    pub out: PathBuf,

    /// Recipient slot, e.g. `top=Ana` (repeatable)
    #[arg(long = "recipient", value_parser = parse_recipient, required = true)]
    pub recipients: Vec<(ShareDirection, String)>,

    /// Drag gesture, photo index then offset, e.g. `0:0,-100` (repeatable)
    #[arg(long = "drag", value_parser = parse_drag)]
    pub drags: Vec<DragSpec>,

    /// Ask before each album is shared
    #[arg(long)]
    pub confirm: bool,

    /// Pause between albums in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Print the current palette
    Show,
    /// List available themes
    List,
    /// Select and save a theme
    Set { theme: AppTheme },
}

/// A scripted drag: which photo and how far it moved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSpec {
    pub photo_index: usize,
    pub offset: Vector2,
}

fn parse_recipient(value: &str) -> Result<(ShareDirection, String), String> {
    let (direction, name) = value
        .split_once('=')
        .ok_or_else(|| format!("expected DIRECTION=NAME, got `{}`", value))?;
    let direction = direction.trim().parse::<ShareDirection>().map_err(|e| e.to_string())?;
    Ok((direction, name.to_string()))
}

fn parse_drag(value: &str) -> Result<DragSpec, String> {
    let err = || format!("expected INDEX:DX,DY, got `{}`", value);
    let (index, offset) = value.split_once(':').ok_or_else(err)?;
    let (dx, dy) = offset.split_once(',').ok_or_else(err)?;

    Ok(DragSpec {
        photo_index: index.trim().parse().map_err(|_| err())?,
        offset: Vector2::new(
            dx.trim().parse().map_err(|_| err())?,
            dy.trim().parse().map_err(|_| err())?,
        ),
    })
}
