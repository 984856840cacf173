use clap::Args;
use kursor_contact::{ContactForm, Employees, Field, FormStatus, HttpSubmitter};

#[derive(Args)]
pub struct SubmitArgs {
    /// Contact endpoint of a running server
    #[arg(long, default_value = "http://127.0.0.1:3000/api/contact")]
    pub endpoint: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub message: String,

    #[arg(long)]
    pub job_title: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Submit as part of a team instead of a solo creator
    #[arg(long)]
    pub team: bool,
}

/// Fills the contact form from the command line and submits it once.
pub async fn submit(args: SubmitArgs) -> anyhow::Result<()> {
    let mut form = ContactForm::new();

    form.set_field(Field::FirstName, args.first_name);
    form.set_field(Field::LastName, args.last_name);
    form.set_field(Field::Email, args.email);
    form.set_field(Field::Message, args.message);
    if let Some(job_title) = args.job_title {
        form.set_field(Field::JobTitle, job_title);
    }
    if let Some(phone) = args.phone {
        form.set_field(Field::Phone, phone);
    }
    if args.team {
        form.select_employees(Employees::Team);
    }

    let submitter = HttpSubmitter::new(args.endpoint);

    match form.submit(&submitter).await {
        Some(FormStatus::Success) => {
            tracing::info!(endpoint = submitter.endpoint(), "{}", FormStatus::Success.message());
            Ok(())
        }
        Some(status) => anyhow::bail!(status.message()),
        None => anyhow::bail!("a submission is already in progress"),
    }
}
