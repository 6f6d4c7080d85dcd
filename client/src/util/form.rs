//! Form feedback helpers.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use forms::FieldError;

/// Message shown above a form: the first field error, one per submit.
#[must_use]
pub fn first_error_message(errors: &[FieldError]) -> String {
    errors.first().map_or_else(|| "Please check the form.".to_owned(), |e| e.message.clone())
}

/// Message for `field`, if that field was rejected.
#[must_use]
pub fn field_message(errors: &[FieldError], field: &str) -> Option<String> {
    errors.iter().find(|e| e.field == field).map(|e| e.message.clone())
}
