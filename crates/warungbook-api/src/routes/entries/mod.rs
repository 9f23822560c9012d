//! Entry routes - Income, expense and dish sale records
//!
//! Lists come back newest first. Create answers 201 with the stored
//! entry, delete answers 204.

pub mod api;

pub use api::{
    api_create_dish,
    api_create_expense,
    api_create_income,
    api_delete_dish,
    api_delete_expense,
    api_delete_income,
    api_list_dishes,
    api_list_expenses,
    api_list_income,
    api_update_dish,
    api_update_expense,
    api_update_income,
};
