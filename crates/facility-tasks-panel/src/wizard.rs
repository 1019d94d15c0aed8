/*
[INPUT]:  Wizard open/close requests from the UI and the trigger flow
[OUTPUT]: SET_CONTENT_PAGE_WIZARD_STATE mutations
[POS]:    Wizard actions - visibility lifecycle of the import/export wizard
[UPDATE]: When the wizard gains steps or persistent fields
*/

use crate::store::{Mutation, Store, WizardState};

/// Open the wizard with a clean error line. An in-flight trigger stays busy.
pub fn show_import_export_wizard(store: &Store) {
    let busy = store.read(|state| state.page_state.wizard_state.busy);
    store.dispatch(Mutation::SetContentPageWizardState(WizardState {
        busy,
        shown: true,
        error: None,
    }));
}

/// Reset the wizard to its closed default.
pub fn close_import_export_wizard(store: &Store) {
    store.dispatch(Mutation::SetContentPageWizardState(WizardState::default()));
}
