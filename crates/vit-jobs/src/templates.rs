//! Email templates with `{{placeholder}}` substitution.

use crate::error::JobError;
use crate::mailer::EmailMessage;

/// Built-in email templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// Sent when a user account is created.
    Welcome,
    /// Sent to an app's owner when the app goes live in the catalog.
    AppPublished,
}

impl EmailTemplate {
    const fn subject(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to Vitrine, {{name}}",
            Self::AppPublished => "{{app_name}} is now live on Vitrine",
        }
    }

    const fn text(self) -> &'static str {
        match self {
            Self::Welcome => {
                "Hi {{name}},\n\n\
                 Your Vitrine account ({{email}}) is ready. You can now add apps, \
                 releases and screenshots from the dashboard.\n\n\
                 The Vitrine team\n"
            }
            Self::AppPublished => {
                "Hi {{name}},\n\n\
                 {{app_name}} was published and is now listed in the catalog:\n\
                 {{app_url}}\n\n\
                 The Vitrine team\n"
            }
        }
    }

    const fn html(self) -> &'static str {
        match self {
            Self::Welcome => {
                "<p>Hi {{name}},</p>\
                 <p>Your Vitrine account (<strong>{{email}}</strong>) is ready.</p>\
                 <p>The Vitrine team</p>"
            }
            Self::AppPublished => {
                "<p>Hi {{name}},</p>\
                 <p><strong>{{app_name}}</strong> was published and is now listed in the \
                 <a href=\"{{app_url}}\">catalog</a>.</p>\
                 <p>The Vitrine team</p>"
            }
        }
    }

    /// Render this template into a message for `to`.
    ///
    /// # Errors
    ///
    /// Returns `JobError::Template` if a placeholder has no value.
    pub fn render(self, to: &str, vars: &[(&str, &str)]) -> Result<EmailMessage, JobError> {
        let html_vars: Vec<(&str, String)> =
            vars.iter().map(|(k, v)| (*k, escape_html(v))).collect();
        let html_vars: Vec<(&str, &str)> =
            html_vars.iter().map(|(k, v)| (*k, v.as_str())).collect();

        Ok(EmailMessage {
            to: to.to_string(),
            subject: render(self.subject(), vars)?,
            text: render(self.text(), vars)?,
            html: Some(render(self.html(), &html_vars)?),
        })
    }
}

/// Replace every `{{key}}` in `template` with its value.
///
/// # Errors
///
/// Returns `JobError::Template` naming the first placeholder without a value,
/// or an unterminated `{{`.
pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String, JobError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| JobError::Template("unterminated placeholder".into()))?;
        let key = after[..end].trim();
        let value = vars
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| JobError::Template(format!("no value for '{{{{{key}}}}}'")))?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn substitutes_placeholders() {
        let out = render("Hi {{name}}, see {{ url }}.", &[("name", "Ada"), ("url", "x")]).unwrap();
        assert_eq!(out, "Hi Ada, see x.");
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = render("Hi {{name}}", &[]).unwrap_err();
        assert!(err.to_string().contains("{{name}}"), "{err}");
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        assert!(render("Hi {{name", &[("name", "Ada")]).is_err());
    }

    #[test]
    fn welcome_renders_all_parts() {
        let msg = EmailTemplate::Welcome
            .render("ada@example.com", &[("name", "Ada"), ("email", "ada@example.com")])
            .unwrap();
        assert_eq!(msg.to, "ada@example.com");
        assert_eq!(msg.subject, "Welcome to Vitrine, Ada");
        assert!(msg.text.contains("(ada@example.com)"));
        assert!(msg.html.unwrap().contains("<strong>ada@example.com</strong>"));
    }

    #[test]
    fn html_values_are_escaped() {
        let msg = EmailTemplate::AppPublished
            .render(
                "owner@example.com",
                &[
                    ("name", "Owner"),
                    ("app_name", "<Pixel & Co>"),
                    ("app_url", "https://vitrine.local/apps/pixel"),
                ],
            )
            .unwrap();
        assert_eq!(msg.subject, "<Pixel & Co> is now live on Vitrine");
        assert!(msg.html.unwrap().contains("&lt;Pixel &amp; Co&gt;"));
    }
}
