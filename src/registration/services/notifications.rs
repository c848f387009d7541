//! Notification composition for the registration lifecycle.

use minijinja::Environment;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

use crate::registration::{
    domain::{Account, RegistrationProfile, Site},
    ports::EmailMessage,
    services::RegistrationConfig,
};

const ACTIVATION_SUBJECT: &str = "Account activation on {{ site_name }}";

const ACTIVATION_TEXT: &str = "\
You (or someone pretending to be you) asked for an account named \
{{ username }} on {{ site_name }}.

To activate the account, visit the address below within the next \
{{ expiration_days }} days:

https://{{ site_domain }}/activate/{{ activation_key }}

If this was not you, simply ignore this message and the request will \
lapse on its own.
";

const ACTIVATION_HTML: &str = "\
<p>You (or someone pretending to be you) asked for an account named \
<strong>{{ username }}</strong> on {{ site_name }}.</p>
<p>To activate the account, follow \
<a href=\"https://{{ site_domain }}/activate/{{ activation_key }}\">this \
link</a> within the next {{ expiration_days }} days.</p>
<p>If this was not you, simply ignore this message and the request will \
lapse on its own.</p>
";

const ADMIN_APPROVE_SUBJECT: &str = "Registration on {{ site_name }} awaits approval";

const ADMIN_APPROVE_TEXT: &str = "\
The account {{ username }} on {{ site_name }} has confirmed its email \
address and now awaits administrator approval.

Review it at:

https://{{ site_domain }}/admin/registrations/{{ profile_id }}
";

const ADMIN_APPROVE_HTML: &str = "\
<p>The account <strong>{{ username }}</strong> on {{ site_name }} has \
confirmed its email address and now awaits administrator approval.</p>
<p><a href=\"https://{{ site_domain }}/admin/registrations/{{ profile_id }}\">\
Review the registration</a>.</p>
";

const APPROVAL_COMPLETE_SUBJECT: &str = "Your account on {{ site_name }} was approved";

const APPROVAL_COMPLETE_TEXT: &str = "\
Good news: an administrator approved your account {{ username }} on \
{{ site_name }}. You can sign in at https://{{ site_domain }}/ now.
";

const APPROVAL_COMPLETE_HTML: &str = "\
<p>Good news: an administrator approved your account \
<strong>{{ username }}</strong> on {{ site_name }}.</p>
<p>You can sign in at <a href=\"https://{{ site_domain }}/\">\
{{ site_domain }}</a> now.</p>
";

/// Errors returned while composing notification messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    /// A message template failed to render.
    #[error("failed to render '{name}' template: {reason}")]
    TemplateRender {
        /// Name of the failing template.
        name: String,
        /// Renderer diagnostic.
        reason: String,
    },
}

/// Composes lifecycle messages from templates and configuration.
///
/// A text body is always rendered; an HTML alternative is attached to the
/// same message only when configuration enables it.
#[derive(Debug, Clone)]
pub struct NotificationComposer {
    config: Arc<RegistrationConfig>,
}

impl NotificationComposer {
    /// Creates a composer over the given configuration.
    #[must_use]
    pub const fn new(config: Arc<RegistrationConfig>) -> Self {
        Self { config }
    }

    /// Composes the activation message sent to a freshly registered
    /// account.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::TemplateRender`] when a template fails
    /// to render.
    pub fn activation_email(
        &self,
        account: &Account,
        profile: &RegistrationProfile,
        site: &Site,
    ) -> Result<EmailMessage, NotificationError> {
        let mut context = base_context(account, site, self.config.activation_window_days());
        context.insert(
            "activation_key".to_owned(),
            Value::String(profile.activation_key().as_str().to_owned()),
        );

        let message = self
            .compose("activation", ACTIVATION_SUBJECT, ACTIVATION_TEXT, ACTIVATION_HTML, &context)?
            .with_recipient(account.email().as_str());
        Ok(message)
    }

    /// Composes the approval-request notice sent to every configured
    /// administrator.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::TemplateRender`] when a template fails
    /// to render.
    pub fn admin_approval_request(
        &self,
        account: &Account,
        profile: &RegistrationProfile,
        site: &Site,
    ) -> Result<EmailMessage, NotificationError> {
        let mut context = base_context(account, site, self.config.activation_window_days());
        context.insert(
            "profile_id".to_owned(),
            Value::String(profile.id().to_string()),
        );

        let recipients: Vec<String> = self
            .config
            .admins()
            .iter()
            .map(|admin| admin.address().to_owned())
            .collect();
        let message = self
            .compose(
                "admin_approval_request",
                ADMIN_APPROVE_SUBJECT,
                ADMIN_APPROVE_TEXT,
                ADMIN_APPROVE_HTML,
                &context,
            )?
            .with_recipients(recipients);
        Ok(message)
    }

    /// Composes the completion notice sent to an approved account.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::TemplateRender`] when a template fails
    /// to render.
    pub fn approval_complete(
        &self,
        account: &Account,
        site: &Site,
    ) -> Result<EmailMessage, NotificationError> {
        let context = base_context(account, site, self.config.activation_window_days());
        let message = self
            .compose(
                "approval_complete",
                APPROVAL_COMPLETE_SUBJECT,
                APPROVAL_COMPLETE_TEXT,
                APPROVAL_COMPLETE_HTML,
                &context,
            )?
            .with_recipient(account.email().as_str());
        Ok(message)
    }

    fn compose(
        &self,
        name: &str,
        subject_template: &str,
        text_template: &str,
        html_template: &str,
        context: &Map<String, Value>,
    ) -> Result<EmailMessage, NotificationError> {
        let subject = render_template(name, subject_template, context)?;
        let text_body = render_template(name, text_template, context)?;
        let mut message = EmailMessage::new(
            self.config.effective_from_address().to_owned(),
            subject,
            text_body,
        );
        if self.config.html_email() {
            let html_body = render_template(name, html_template, context)?;
            message = message.with_html_body(html_body);
        }
        Ok(message)
    }
}

fn base_context(account: &Account, site: &Site, expiration_days: i64) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert(
        "username".to_owned(),
        Value::String(account.username().as_str().to_owned()),
    );
    context.insert(
        "site_name".to_owned(),
        Value::String(site.name().to_owned()),
    );
    context.insert(
        "site_domain".to_owned(),
        Value::String(site.domain().to_owned()),
    );
    context.insert("expiration_days".to_owned(), Value::from(expiration_days));
    context
}

fn render_template(
    name: &str,
    template: &str,
    context: &Map<String, Value>,
) -> Result<String, NotificationError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| NotificationError::TemplateRender {
            name: name.to_owned(),
            reason: error.to_string(),
        })
}
