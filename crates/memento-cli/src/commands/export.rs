use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use memento_core::export::{ArchiveExporter, DateRange, ExportOptions, HttpImageFetcher};

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::helpers::{parse_date, parse_origin};
use crate::output::print_export;

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let range = DateRange::new(start, end)?;

    let export_config = &ctx.config().export;
    let origin = match args.origin.as_deref().or(export_config.origin.as_deref()) {
        Some(value) => Some(parse_origin(value)?),
        None => None,
    };
    let out_dir = match args.out.as_deref().or(export_config.output_dir.as_deref()) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };

    let (_store, snapshot) = ctx.load_journal()?;

    let cancel = Arc::new(AtomicBool::new(false));
    let mut options = ExportOptions::new().cancel_flag(Arc::clone(&cancel));
    if let Some(origin) = origin {
        options = options.origin(origin);
    }
    let fetcher = HttpImageFetcher::new(Duration::from_secs(export_config.fetch_timeout_seconds))?;
    let exporter = ArchiveExporter::new(fetcher, options);
    debug!(%range, out = %out_dir.display(), "starting export");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let archive = runtime.block_on(async {
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.store(true, Ordering::Relaxed);
            }
        });
        let result = exporter.export(&snapshot.entries, range, ctx.now()).await;
        watcher.abort();
        result
    })?;

    let path = archive.write_to_dir(&out_dir)?;

    let ui = ctx.ui(false);
    if !ctx.quiet() {
        print_export(&ui, &path, &archive.report);
    }
    Ok(())
}
