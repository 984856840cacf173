use askama::Template;
use kursor_contact::Submission;

use crate::{OutgoingEmail, TransportConfig, TransportError};

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    job_title: Option<&'a str>,
    phone: Option<&'a str>,
    employees: Option<&'a str>,
    message_lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "contact.txt")]
struct ContactPlainTemplate<'a> {
    name: &'a str,
    email: &'a str,
    job_title: Option<&'a str>,
    phone: Option<&'a str>,
    employees: Option<&'a str>,
    message: &'a str,
}

pub fn subject(submission: &Submission) -> String {
    format!("New Contact Form Submission from {}", submission.name)
}

/// Admin notification for one submission. Replies go to the submitter.
pub fn notification(
    submission: &Submission,
    from_name: &str,
    transport: &TransportConfig,
) -> Result<OutgoingEmail, TransportError> {
    let employees = submission.employees.map(|e| e.label());

    let html = ContactHtmlTemplate {
        name: &submission.name,
        email: &submission.email,
        job_title: submission.job_title.as_deref(),
        phone: submission.phone.as_deref(),
        employees,
        message_lines: submission.message.lines().collect(),
    }
    .render()?;

    let plain = ContactPlainTemplate {
        name: &submission.name,
        email: &submission.email,
        job_title: submission.job_title.as_deref(),
        phone: submission.phone.as_deref(),
        employees,
        message: &submission.message,
    }
    .render()?;

    Ok(OutgoingEmail {
        from: format!("{from_name} <{}>", transport.sender()),
        to: transport.recipient().to_owned(),
        reply_to: submission.email.clone(),
        subject: subject(submission),
        plain,
        html,
    })
}

#[cfg(test)]
mod tests {
    use kursor_contact::Employees;

    use super::*;
    use crate::SmtpSettings;

    fn production() -> TransportConfig {
        TransportConfig::Production(SmtpSettings {
            host: "smtp.example.com".to_owned(),
            port: 587,
            secure: false,
            user: "bot@example.com".to_owned(),
            password: "secret".to_owned(),
            admin_email: "admin@example.com".to_owned(),
        })
    }

    fn submission(message: &str) -> Submission {
        Submission {
            name: "Ann".to_owned(),
            email: "ann@x.com".to_owned(),
            message: message.to_owned(),
            job_title: None,
            phone: None,
            employees: None,
        }
    }

    #[test]
    fn addresses_and_subject() {
        let email = notification(&submission("Hi"), "Kursor Contact", &production()).unwrap();

        assert_eq!(email.from, "Kursor Contact <bot@example.com>");
        assert_eq!(email.to, "admin@example.com");
        assert_eq!(email.reply_to, "ann@x.com");
        assert_eq!(email.subject, "New Contact Form Submission from Ann");
    }

    #[test]
    fn plain_body_lists_fields() {
        let email =
            notification(&submission("line one\nline two"), "Kursor", &production()).unwrap();

        assert!(email.plain.starts_with("Name: Ann\nEmail: ann@x.com\n"));
        assert!(email.plain.contains("Message: line one\nline two"));
        assert!(!email.plain.contains("Phone:"));
    }

    #[test]
    fn html_body_breaks_lines_and_escapes_markup() {
        let email = notification(
            &submission("<script>alert(1)</script>\nbye & thanks"),
            "Kursor",
            &production(),
        )
        .unwrap();

        assert!(!email.html.contains("<script>"));
        assert!(!email.html.contains("bye & thanks"));
        assert!(email.html.contains("&#60;script&#62;alert(1)&#60;/script&#62;"));
        assert!(email.html.contains("<br/>bye &#38; thanks"));
        assert!(email.html.contains("<strong>Name:</strong> Ann"));
    }

    #[test]
    fn optional_fields_are_included() {
        let mut submission = submission("Hi");
        submission.job_title = Some("CTO".to_owned());
        submission.phone = Some("555-0100".to_owned());
        submission.employees = Some(Employees::Team);

        let email = notification(&submission, "Kursor", &production()).unwrap();

        assert!(email.plain.contains("Job title: CTO"));
        assert!(email.plain.contains("Phone: 555-0100"));
        assert!(email.plain.contains("Team size: I'm part of a team"));
        assert!(email.html.contains("<strong>Team size:</strong> I"));
        assert!(email.html.contains("m part of a team"));
    }
}
