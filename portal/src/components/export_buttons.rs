//! CSV/JSON export of a table's filtered rows.

use leptos::prelude::*;
use records::export::{ExportFile, ExportFormat};

use crate::state::ActionError;
use crate::state::notice::Notices;
use crate::util::download;

const FORMATS: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Json];

/// One button per format. `export` builds the file from page state; the
/// download and its toast happen here.
#[component]
pub fn ExportButtons(export: Callback<ExportFormat, Result<ExportFile, ActionError>>) -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();

    let run = move |format: ExportFormat| {
        let outcome = export.run(format).and_then(|file| {
            download::offer(&file)?;
            Ok(format!("Exported {}", file.filename))
        });
        notices.update(|n| {
            n.report(outcome);
        });
    };

    view! {
        <div class="export-buttons">
            {FORMATS
                .iter()
                .map(|format| {
                    let format = *format;
                    view! {
                        <button class="btn btn--ghost" on:click=move |_| run(format)>
                            {format!("Export {}", format.label())}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
