//! Patient invitation form model
//!
//! The invite page treats this as an opaque form: it hands over a sender and a
//! zero-argument "invitation sent" callback, and only learns about success.
//! Delivery sits behind [`InvitationSender`]; nothing here talks to a network
//! or writes to disk.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{KinError, Result};

/// Longest personal message accepted, in characters
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Editable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InviteField {
    PatientName,
    PatientEmail,
    Relationship,
    Message,
}

impl InviteField {
    pub const ALL: [InviteField; 4] = [
        InviteField::PatientName,
        InviteField::PatientEmail,
        InviteField::Relationship,
        InviteField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InviteField::PatientName => "Patient name",
            InviteField::PatientEmail => "Patient email",
            InviteField::Relationship => "Your relationship",
            InviteField::Message => "Personal message",
        }
    }

    /// Key used in validation errors
    pub fn key(&self) -> &'static str {
        match self {
            InviteField::PatientName => "patient_name",
            InviteField::PatientEmail => "patient_email",
            InviteField::Relationship => "relationship",
            InviteField::Message => "message",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, InviteField::PatientName | InviteField::PatientEmail)
    }

    /// Validation error for this field, worded with its label
    fn invalid(&self, reason: impl Into<String>) -> KinError {
        KinError::validation(self.key(), self.label(), reason)
    }
}

/// Unsubmitted form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationDraft {
    pub patient_name: String,
    pub patient_email: String,
    pub relationship: String,
    pub message: String,
}

impl InvitationDraft {
    pub fn get(&self, field: InviteField) -> &str {
        match field {
            InviteField::PatientName => &self.patient_name,
            InviteField::PatientEmail => &self.patient_email,
            InviteField::Relationship => &self.relationship,
            InviteField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: InviteField) -> &mut String {
        match field {
            InviteField::PatientName => &mut self.patient_name,
            InviteField::PatientEmail => &mut self.patient_email,
            InviteField::Relationship => &mut self.relationship,
            InviteField::Message => &mut self.message,
        }
    }

    /// Check every field, reporting the first failure in tab order
    pub fn validate(&self) -> Result<()> {
        if self.patient_name.trim().is_empty() {
            return Err(InviteField::PatientName.invalid("is required"));
        }

        validate_email(self.patient_email.trim())?;

        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(InviteField::Message.invalid(format!(
                "must be at most {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    let field = InviteField::PatientEmail;

    if email.is_empty() {
        return Err(field.invalid("is required"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(field.invalid("must not contain spaces"));
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(field.invalid("must contain exactly one '@'"));
    };

    if local.is_empty() {
        return Err(field.invalid("is missing the part before '@'"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(field.invalid("has an invalid domain"));
    }

    Ok(())
}

/// A validated invitation, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
    pub relationship: Option<String>,
    pub message: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl Invitation {
    /// Validate and normalize a draft (trimmed text, blank optionals dropped)
    pub fn from_draft(draft: &InvitationDraft) -> Result<Self> {
        draft.validate()?;

        let optional = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Ok(Self {
            id: Uuid::new_v4(),
            patient_name: draft.patient_name.trim().to_string(),
            patient_email: draft.patient_email.trim().to_string(),
            relationship: optional(&draft.relationship),
            message: optional(&draft.message),
            sent_at: Utc::now(),
        })
    }
}

/// Delivers invitations
pub trait InvitationSender {
    fn send(&mut self, invitation: &Invitation) -> Result<()>;
}

/// Keeps sent invitations in memory and logs each one
#[derive(Debug, Default)]
pub struct LoggingSender {
    sent: Vec<Invitation>,
}

impl LoggingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[Invitation] {
        &self.sent
    }
}

impl InvitationSender for LoggingSender {
    fn send(&mut self, invitation: &Invitation) -> Result<()> {
        info!(
            id = %invitation.id,
            email = %invitation.patient_email,
            "invitation sent"
        );
        self.sent.push(invitation.clone());
        Ok(())
    }
}

/// The invitation form: a draft plus submission
#[derive(Debug, Default)]
pub struct PatientInvitation {
    draft: InvitationDraft,
}

impl PatientInvitation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &InvitationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut InvitationDraft {
        &mut self.draft
    }

    /// Validate, deliver, and on success reset the form and fire `on_sent`.
    ///
    /// On any error the draft is left as typed and `on_sent` is not called.
    pub fn submit<S, F>(&mut self, sender: &mut S, on_sent: F) -> Result<Invitation>
    where
        S: InvitationSender + ?Sized,
        F: FnOnce(),
    {
        let invitation = Invitation::from_draft(&self.draft)?;

        if let Err(err) = sender.send(&invitation) {
            warn!(email = %invitation.patient_email, error = %err, "invitation delivery failed");
            return Err(err);
        }

        self.draft = InvitationDraft::default();
        on_sent();
        Ok(invitation)
    }
}
