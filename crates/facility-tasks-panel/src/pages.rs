/*
[INPUT]:  Page transitions requested by the router
[OUTPUT]: SET_PAGE mutations (new page generation, fresh page state)
[POS]:    Page actions - one show action per routed page
[UPDATE]: When a page needs setup beyond switching to it
*/

use std::collections::BTreeMap;

use crate::routes::PageName;
use crate::store::{Mutation, Store};

fn show_page(store: &Store, page: PageName, params: BTreeMap<String, String>) {
    store.dispatch(Mutation::SetPage { page, params });
}

fn id_param(id: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("id".to_string(), id.to_string())])
}

pub fn show_classes_page(store: &Store) {
    show_page(store, PageName::ClassMgmt, BTreeMap::new());
}

pub fn show_class_edit_page(store: &Store, class_id: &str) {
    show_page(store, PageName::ClassEditMgmt, id_param(class_id));
}

pub fn show_class_enroll_page(store: &Store, class_id: &str) {
    show_page(store, PageName::ClassEnrollMgmt, id_param(class_id));
}

pub fn show_user_page(store: &Store) {
    show_page(store, PageName::UserMgmt, BTreeMap::new());
}

/// The data page hosts the import/export wizard and the task list.
pub fn show_data_page(store: &Store) {
    show_page(store, PageName::DataExport, BTreeMap::new());
}

pub fn show_facility_config_page(store: &Store) {
    show_page(store, PageName::FacilityConfig, BTreeMap::new());
}
