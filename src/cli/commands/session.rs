//! Commands operating on the stored session: regenerate, select, show, reset.

use anyhow::Result;

use super::{open_store, resume, CliSession};
use crate::cli::output::{output, ItineraryOutput, MessageOutput, SelectionOutput};
use crate::domain::models::Config;

fn itinerary_output(session: &CliSession, index: usize) -> ItineraryOutput {
    ItineraryOutput {
        itinerary: session.itinerary().clone(),
        ranges: *session.ranges(),
        index,
        shown: session.history().len(),
    }
}

/// Draw a new itinerary that avoids everything shown so far.
pub fn regenerate(config: &Config, json: bool) -> Result<()> {
    let mut session = resume(config)?;
    session.regenerate();
    output(&itinerary_output(&session, session.index()), json);
    Ok(())
}

/// Remember page `index` and print its venue.
pub fn select(index: usize, config: &Config, json: bool) -> Result<()> {
    let mut session = resume(config)?;
    let selection = session.select(index);
    output(&SelectionOutput { index, selection }, json);
    Ok(())
}

/// Print the stored itinerary at the last viewed page.
pub fn show(config: &Config, json: bool) -> Result<()> {
    let session = resume(config)?;
    let index = session.restore_index();
    output(&itinerary_output(&session, index), json);
    Ok(())
}

/// Delete the state file.
pub fn reset(config: &Config, json: bool) -> Result<()> {
    let mut store = open_store(config);
    store.clear()?;
    output(
        &MessageOutput {
            message: format!("Session cleared ({})", store.path().display()),
        },
        json,
    );
    Ok(())
}
