//! Core processing pipeline: load → resolve → select → export.

use std::time::Instant;

use tracing::{debug, info};

use depview_core::{DependencyResolver, Session};
use depview_error::Result;

use crate::DepviewOptions;
use crate::output::{render_listing, write_outputs};

/// Run one load-to-export pass.
///
/// 1. Parse the solution file and resolve project references
/// 2. Build the working selection
/// 3. Write reports, graph and image (if requested)
/// 4. Return the project listing when asked for, or when nothing else was
pub fn process_solution(opts: &DepviewOptions) -> Result<Option<String>> {
    // 1. Load + resolve
    let load_start = Instant::now();
    let resolver = DependencyResolver::new().with_project_files(opts.read_project_files);
    let mut session = Session::load(&opts.solution, &resolver)?;
    info!(
        "Loading & resolution: {:.2}s",
        load_start.elapsed().as_secs_f64()
    );
    if !session.warnings().is_empty() {
        info!(count = session.warnings().len(), "resolution warnings");
        for warning in session.warnings() {
            debug!("{warning}");
        }
    }

    // 2. Select
    if opts.select_all {
        session.select_all();
    }
    for key in &opts.select {
        session.select_by_key(key)?;
    }
    debug!(selected = session.working().len(), "selection built");

    // 3. Export
    let export_start = Instant::now();
    write_outputs(opts, &session)?;
    if opts.has_exports() {
        info!("Export: {:.2}s", export_start.elapsed().as_secs_f64());
    }

    // 4. Listing
    if opts.list || !opts.has_exports() {
        return Ok(Some(render_listing(session.full())));
    }
    Ok(None)
}
