//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Form components own a `FormState` signal each and call the browser gateway
//! on submit.

pub mod form_field;
pub mod form_submit;
pub mod sign_in_form;
pub mod sign_up_form;
