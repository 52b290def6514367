//! Product edit form lifecycle
//!
//! State machine mirroring the admin edit page:
//! `Loading → Editing → Submitting → Succeeded | Failed`, with an
//! image-upload side channel and one-shot transient notices.
//!
//! Field bindings are strings; `price` (dollars) and `countInStock` are
//! coerced to numeric types when the form is submitted. Required-field
//! validation mirrors the backend's all-fields-required expectation.

use crate::api::{Product, UpdateProduct};

/// Lifecycle phase of the edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Initial fetch in flight
    Loading,
    /// Fields populated, accepting user input
    Editing,
    /// Update request in flight
    Submitting,
    /// Update confirmed; caller navigates away
    Succeeded,
    /// Initial fetch failed; the form never became editable
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot transient notification (the toast equivalent)
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// String-typed field bindings
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pub name: String,
    /// Display price in dollars, e.g. "5.00"
    pub price: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub count_in_stock: String,
    pub description: String,
}

/// A field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str, label: &str) -> Self {
        Self {
            field,
            message: format!("{} is required", label),
        }
    }

    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Why a submit attempt did not produce a payload
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// A submit is already in flight
    AlreadySubmitting,
    /// The form is not in an editable phase
    NotEditable,
    /// One or more fields failed validation
    Invalid(Vec<FieldError>),
}

/// The product edit form state machine
pub struct ProductEditForm {
    phase: FormPhase,
    fields: FormFields,
    populated: bool,
    notice: Option<Notice>,
}

impl ProductEditForm {
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Loading,
            fields: FormFields::default(),
            populated: false,
            notice: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Mutable field bindings, for user edits.
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// One-time synchronization of fields from the fetched record.
    ///
    /// Subsequent calls are no-ops so user edits are never clobbered by a
    /// re-render.
    pub fn populate(&mut self, product: &Product) {
        if self.populated {
            return;
        }
        self.fields = FormFields {
            name: product.name.clone(),
            price: format!("{:.2}", product.price as f64 / 100.0),
            image: product.image.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            count_in_stock: product.count_in_stock.to_string(),
            description: product.description.clone(),
        };
        self.populated = true;
        self.phase = FormPhase::Editing;
    }

    /// The initial fetch failed; the form never becomes editable.
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Failed;
        self.push_error(message);
    }

    /// Upload side channel: on success the stored path lands in the image
    /// binding. It is persisted only when the form itself is submitted.
    pub fn attach_uploaded_image(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.fields.image = path.into();
        self.notice = Some(Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        });
    }

    /// Upload side channel failure; the form stays editable.
    pub fn upload_failed(&mut self, message: impl Into<String>) {
        self.push_error(message);
    }

    /// Validate, coerce, and move to Submitting.
    ///
    /// Returns the update payload to send. While a submit is in flight
    /// further attempts are rejected.
    pub fn begin_submit(&mut self) -> Result<UpdateProduct, FormError> {
        match self.phase {
            FormPhase::Submitting => return Err(FormError::AlreadySubmitting),
            FormPhase::Editing => {}
            _ => return Err(FormError::NotEditable),
        }

        let payload = self.validate_and_coerce()?;
        self.phase = FormPhase::Submitting;
        Ok(payload)
    }

    /// The update call succeeded; caller navigates away.
    pub fn submit_succeeded(&mut self) {
        self.phase = FormPhase::Succeeded;
        self.notice = Some(Notice {
            kind: NoticeKind::Success,
            message: "Product updated successfully".to_string(),
        });
    }

    /// The update call failed; the form is retained for another attempt.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Editing;
        self.push_error(message);
    }

    /// Take the pending notice, if any. Notices are one-shot.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    fn push_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        });
    }

    fn validate_and_coerce(&self) -> Result<UpdateProduct, FormError> {
        let mut errors = Vec::new();
        let f = &self.fields;

        if f.name.trim().is_empty() {
            errors.push(FieldError::required("name", "Name"));
        }
        if f.brand.trim().is_empty() {
            errors.push(FieldError::required("brand", "Brand"));
        }
        if f.category.trim().is_empty() {
            errors.push(FieldError::required("category", "Category"));
        }
        if f.description.trim().is_empty() {
            errors.push(FieldError::required("description", "Description"));
        }

        let price = if f.price.trim().is_empty() {
            errors.push(FieldError::required("price", "Price"));
            None
        } else {
            match f.price.trim().parse::<f64>() {
                Ok(dollars) if dollars.is_finite() && dollars >= 0.0 => {
                    Some((dollars * 100.0).round() as i64)
                }
                _ => {
                    errors.push(FieldError::invalid("price", "Price must be a non-negative number"));
                    None
                }
            }
        };

        let count_in_stock = if f.count_in_stock.trim().is_empty() {
            errors.push(FieldError::required("countInStock", "Count In Stock"));
            None
        } else {
            match f.count_in_stock.trim().parse::<i32>() {
                Ok(count) if count >= 0 => Some(count),
                _ => {
                    errors.push(FieldError::invalid(
                        "countInStock",
                        "Count In Stock must be a non-negative integer",
                    ));
                    None
                }
            }
        };

        match (price, count_in_stock) {
            (Some(price), Some(count_in_stock)) if errors.is_empty() => Ok(UpdateProduct {
                name: f.name.trim().to_string(),
                price,
                description: f.description.trim().to_string(),
                image: f.image.clone(),
                brand: f.brand.trim().to_string(),
                category: f.category.trim().to_string(),
                count_in_stock,
            }),
            _ => Err(FormError::Invalid(errors)),
        }
    }
}

impl Default for ProductEditForm {
    fn default() -> Self {
        Self::new()
    }
}
