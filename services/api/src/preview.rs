use clap::Args;
use salon_booking::appointments::{templates, AppointmentSubmission, IntakeError, OutboundEmail};
use salon_booking::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Customer name
    #[arg(long, default_value = "Aisha")]
    pub(crate) name: String,
    /// Customer e-mail address
    #[arg(long, default_value = "a@x.com")]
    pub(crate) email: String,
    /// Customer phone number
    #[arg(long, default_value = "0300")]
    pub(crate) phone: String,
    /// Booked service
    #[arg(long, default_value = "Facial")]
    pub(crate) service: String,
    /// Appointment date as entered on the form
    #[arg(long, default_value = "2024-05-01")]
    pub(crate) date: String,
    /// Appointment time, 24-hour or already annotated with AM/PM
    #[arg(long, default_value = "15:00")]
    pub(crate) time: String,
    /// Optional note for the salon
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Operator inbox shown on the alert e-mail
    #[arg(long, default_value = "owner@example.com")]
    pub(crate) operator_address: String,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let PreviewArgs {
        name,
        email,
        phone,
        service,
        date,
        time,
        message,
        operator_address,
    } = args;

    let submission = AppointmentSubmission {
        name: Some(name),
        email: Some(email),
        phone: Some(phone),
        service: Some(service),
        date: Some(date),
        time: Some(time),
        message,
    };
    let appointment = submission.validate().map_err(IntakeError::from)?;

    let customer = templates::customer_confirmation(&appointment);
    let operator = templates::operator_alert(
        &appointment,
        &operator_address,
        &templates::booking_reference(),
    );

    print_email("Customer confirmation", &customer);
    println!();
    print_email("Operator alert", &operator);
    Ok(())
}

fn print_email(heading: &str, email: &OutboundEmail) {
    println!("=== {heading} ===");
    println!("From: {}", email.sender_name);
    println!("To: {}", email.to);
    println!("Subject: {}", email.subject);
    println!();
    println!("{}", email.html_body);
}
