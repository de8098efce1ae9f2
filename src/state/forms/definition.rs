//! Declarative descriptions of the forms that submit to Sirius

use super::field::{FieldKind, FieldSpec};
use reqwest::Method;

/// How a form snapshot is written into the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// `application/x-www-form-urlencoded;charset=UTF-8`
    #[default]
    Form,
    /// `application/json`, an object typed by each field's [`FieldKind`]
    Json,
}

impl Encoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Form => "application/x-www-form-urlencoded;charset=UTF-8",
            Self::Json => "application/json",
        }
    }
}

/// One submit flow: where it goes and which fields it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    pub name: &'static str,
    pub method: Method,
    pub path: String,
    pub encoding: Encoding,
    pub fields: Vec<FieldSpec>,
}

const CHANGE_PASSWORD_FIELDS: [FieldSpec; 3] = [
    FieldSpec::secret("existingPassword", "Current password"),
    FieldSpec::secret("password", "Create your new password"),
    FieldSpec::secret("confirmPassword", "Confirm new password"),
];

impl FormDefinition {
    pub fn new(
        name: &'static str,
        method: Method,
        path: impl Into<String>,
        encoding: Encoding,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            name,
            method,
            path: path.into(),
            encoding,
            fields,
        }
    }

    pub fn change_password() -> Self {
        Self::new(
            "change_password",
            Method::POST,
            "/auth/change-password",
            Encoding::Form,
            CHANGE_PASSWORD_FIELDS.to_vec(),
        )
    }

    pub fn edit_my_details(user_id: u32) -> Self {
        Self::new(
            "edit_my_details",
            Method::PUT,
            format!("/api/v1/users/{user_id}/updateTelephoneNumber"),
            Encoding::Json,
            vec![FieldSpec::text("phoneNumber", "Phone number")],
        )
    }

    /// Sirius still expects the legacy `type` and `teamType` keys, empty.
    /// `teamType[handle]` is only sent when a type was chosen.
    pub fn add_team() -> Self {
        Self::new(
            "add_team",
            Method::POST,
            "/api/team",
            Encoding::Form,
            vec![
                FieldSpec::text("email", "Email address"),
                FieldSpec::text("name", "Team name"),
                FieldSpec::text("phone", "Phone number"),
                FieldSpec::hidden("teamType", ""),
                FieldSpec::text("teamType[handle]", "Team type").omit_when_empty(),
                FieldSpec::hidden("type", ""),
            ],
        )
    }

    /// Every current member is echoed back as `members[i][id]`; a member
    /// missing from the list is removed from the team.
    pub fn edit_team(team_id: u32, member_ids: &[u32]) -> Self {
        let mut fields = vec![FieldSpec::text("email", "Email address")];
        fields.extend(
            member_ids
                .iter()
                .enumerate()
                .map(|(i, id)| FieldSpec::hidden(format!("members[{i}][id]"), id.to_string())),
        );
        fields.extend([
            FieldSpec::text("name", "Team name"),
            FieldSpec::text("phoneNumber", "Phone number"),
            FieldSpec::text("teamType[handle]", "Team type"),
        ]);

        Self::new(
            "edit_team",
            Method::PUT,
            format!("/api/team/{team_id}"),
            Encoding::Form,
            fields,
        )
    }

    pub fn add_user() -> Self {
        Self::new(
            "add_user",
            Method::POST,
            "/auth/user",
            Encoding::Json,
            vec![
                FieldSpec::text("firstname", "First name"),
                FieldSpec::text("surname", "Last name"),
                FieldSpec::text("email", "Email address"),
                FieldSpec::text("roles", "Roles").with_kind(FieldKind::List),
            ],
        )
    }

    /// `roles` is comma-separated and must include the organisation role
    pub fn edit_user(user_id: u32) -> Self {
        Self::new(
            "edit_user",
            Method::PUT,
            format!("/auth/user/{user_id}"),
            Encoding::Json,
            user_fields(user_id, FieldSpec::text("locked", "Locked").with_kind(FieldKind::Flag)),
        )
    }

    /// Sirius replaces the whole user, so the caller fills the remaining
    /// fields with the user's current details.
    pub fn unlock_user(user_id: u32) -> Self {
        Self::new(
            "unlock_user",
            Method::PUT,
            format!("/auth/user/{user_id}"),
            Encoding::Json,
            user_fields(user_id, FieldSpec::hidden("locked", "false").with_kind(FieldKind::Flag)),
        )
    }

    pub fn resend_confirmation() -> Self {
        Self::new(
            "resend_confirmation",
            Method::POST,
            "/auth/resend-confirmation",
            Encoding::Form,
            vec![FieldSpec::text("email", "Email address")],
        )
    }

    pub fn edit_random_review_settings() -> Self {
        Self::new(
            "edit_random_review_settings",
            Method::POST,
            "/api/v1/random-review-settings",
            Encoding::Json,
            vec![
                FieldSpec::text("layPercentage", "Lay percentage"),
                FieldSpec::text("paPercentage", "PA percentage"),
                FieldSpec::text("proPercentage", "Pro percentage"),
                FieldSpec::text("reviewCycle", "Review cycle (years)"),
            ],
        )
    }

    pub fn delete_user(user_id: u32) -> Self {
        Self::new(
            "delete_user",
            Method::DELETE,
            format!("/auth/user/{user_id}"),
            Encoding::Form,
            Vec::new(),
        )
    }

    pub fn delete_team(team_id: u32) -> Self {
        Self::new(
            "delete_team",
            Method::DELETE,
            format!("/api/team/{team_id}"),
            Encoding::Form,
            Vec::new(),
        )
    }
}

fn user_fields(user_id: u32, locked: FieldSpec) -> Vec<FieldSpec> {
    vec![
        FieldSpec::hidden("id", user_id.to_string()).with_kind(FieldKind::Number),
        FieldSpec::text("firstname", "First name"),
        FieldSpec::text("surname", "Last name"),
        FieldSpec::text("email", "Email address"),
        FieldSpec::text("roles", "Roles").with_kind(FieldKind::List),
        locked,
        FieldSpec::text("suspended", "Suspended").with_kind(FieldKind::Flag),
    ]
}
