//! HTML bodies for the two booking notifications.
//!
//! Every submitted value is escaped before interpolation; the templates carry
//! no logic beyond that.

use chrono::Utc;

use super::domain::Appointment;
use super::mailer::OutboundEmail;

pub const SALON_NAME: &str = "Nikhaar Beauty Salon";
pub const CUSTOMER_SUBJECT: &str = "Appointment Confirmation - Nikhaar Beauty Salon";
pub const OPERATOR_SUBJECT: &str = "New Appointment Booking - Nikhaar Beauty Salon";
pub const OPERATOR_SENDER_NAME: &str = "Nikhaar Beauty Salon Booking System";

const WEBSITE_URL: &str = "https://nikhaar.vercel.app";
const CONTACT_PHONES: &str = "(+92) 307-2548318 or (+92) 319-7718769";
const CONTACT_EMAIL: &str = "nikhaar.glow@gmail.com";
const CONTACT_ADDRESS: &str = "5/528 Liaquatabad No. 5, Karachi, Pakistan";
const BRAND_COLOR: &str = "#d4267d";

/// Short reference shown to the operator: the last six digits of the current epoch milliseconds.
pub fn booking_reference() -> String {
    format!("{:06}", Utc::now().timestamp_millis().rem_euclid(1_000_000))
}

pub fn customer_confirmation(appointment: &Appointment) -> OutboundEmail {
    let rows = [
        detail_row("Service", &appointment.service),
        detail_row("Date", &appointment.date),
        detail_row("Time", &appointment.display_time()),
    ]
    .concat();

    let body = format!(
        r#"<p>Dear {name},</p>
<p>We're delighted to confirm your appointment at {salon}. Here are your booking details:</p>
<table style="width:100%;background:#f9f2f6;border-radius:8px;padding:12px;">{rows}</table>
<div style="background:#f5f5f5;padding:15px;border-radius:8px;margin-top:20px;">
<h3 style="color:{color};margin-top:0;">Need to make changes?</h3>
<p>Phone: {phones}</p>
<p>Email: {contact_email}</p>
<p>Location: {address}</p>
</div>
<p style="text-align:center;color:{color};font-size:18px;">We look forward to pampering you!</p>
<p style="text-align:center;"><a href="{website}" style="background:{color};color:#ffffff;padding:12px 25px;border-radius:5px;text-decoration:none;">Visit Our Website</a></p>"#,
        name = escape_html(&appointment.name),
        salon = SALON_NAME,
        rows = rows,
        color = BRAND_COLOR,
        phones = CONTACT_PHONES,
        contact_email = CONTACT_EMAIL,
        address = CONTACT_ADDRESS,
        website = WEBSITE_URL,
    );

    OutboundEmail {
        sender_name: SALON_NAME.to_string(),
        to: appointment.email.clone(),
        subject: CUSTOMER_SUBJECT.to_string(),
        html_body: document(
            "Appointment Confirmed!",
            &format!("Thank you for choosing {SALON_NAME}"),
            &body,
            &format!("&copy; {SALON_NAME}. All rights reserved."),
        ),
    }
}

pub fn operator_alert(
    appointment: &Appointment,
    operator_address: &str,
    reference: &str,
) -> OutboundEmail {
    let rows = [
        detail_row("Customer Name", &appointment.name),
        detail_row("Email", &appointment.email),
        detail_row("Phone", &appointment.phone),
        detail_row("Service", &appointment.service),
        detail_row("Date", &appointment.date),
        detail_row("Time", &appointment.display_time()),
    ]
    .concat();

    let message = if appointment.message.is_empty() {
        "No message provided".to_string()
    } else {
        escape_html(&appointment.message)
    };

    let body = format!(
        r#"<table style="width:100%;background:#f9f2f6;border-radius:8px;padding:12px;">{rows}</table>
<div style="background:#f5f5f5;padding:15px;border-radius:8px;margin-top:20px;">
<h3 style="color:{color};margin-top:0;">Customer Message:</h3>
<p style="margin:0;">{message}</p>
</div>
<p style="text-align:center;color:#666666;">This booking has been added to the appointments sheet.</p>"#,
        rows = rows,
        color = BRAND_COLOR,
        message = message,
    );

    OutboundEmail {
        sender_name: OPERATOR_SENDER_NAME.to_string(),
        to: operator_address.to_string(),
        subject: OPERATOR_SUBJECT.to_string(),
        html_body: document(
            "New Appointment Booking",
            &format!("Booking Reference: #{}", escape_html(reference)),
            &body,
            "This is an automated message, please do not reply directly.",
        ),
    }
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        r#"<tr><td style="padding:10px;color:{BRAND_COLOR};font-weight:bold;">{label}:</td><td style="padding:10px;text-align:right;">{}</td></tr>"#,
        escape_html(value)
    )
}

fn document(title: &str, subtitle: &str, body: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family:Arial,sans-serif;">
<div style="max-width:600px;margin:0 auto;padding:20px;background:#ffffff;border-radius:10px;">
<div style="background:linear-gradient(135deg,{BRAND_COLOR},#b4005f);color:#ffffff;padding:20px;border-radius:8px 8px 0 0;text-align:center;">
<h1 style="margin:0;">{title}</h1>
<p style="margin:10px 0 0;">{subtitle}</p>
</div>
<div style="padding:20px;">
{body}
</div>
<div style="text-align:center;padding:20px;color:#666666;font-size:12px;">{footer}</div>
</div>
</body>
</html>"#
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment() -> Appointment {
        Appointment {
            name: "Aisha".to_string(),
            email: "a@x.com".to_string(),
            phone: "0300".to_string(),
            service: "Facial".to_string(),
            date: "2024-05-01".to_string(),
            time: "15:00".to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn customer_email_addresses_submitter() {
        let email = customer_confirmation(&appointment());
        assert_eq!(email.to, "a@x.com");
        assert_eq!(email.subject, CUSTOMER_SUBJECT);
        assert_eq!(email.sender_name, SALON_NAME);
        assert!(email.html_body.contains("Dear Aisha,"));
        assert!(email.html_body.contains("Facial"));
        assert!(email.html_body.contains("2024-05-01"));
        assert!(email.html_body.contains("3:00 PM"));
    }

    #[test]
    fn operator_email_lists_every_field() {
        let mut appointment = appointment();
        appointment.message = "Please call first".to_string();
        let email = operator_alert(&appointment, "owner@example.com", "123456");

        assert_eq!(email.to, "owner@example.com");
        assert_eq!(email.subject, OPERATOR_SUBJECT);
        assert_eq!(email.sender_name, OPERATOR_SENDER_NAME);
        for value in [
            "Aisha",
            "a@x.com",
            "0300",
            "Facial",
            "2024-05-01",
            "3:00 PM",
            "Please call first",
            "#123456",
        ] {
            assert!(email.html_body.contains(value), "body missing {value}");
        }
    }

    #[test]
    fn operator_email_notes_absent_message() {
        let email = operator_alert(&appointment(), "owner@example.com", "000001");
        assert!(email.html_body.contains("No message provided"));
    }

    #[test]
    fn submitted_values_are_escaped() {
        let mut appointment = appointment();
        appointment.name = "<script>alert('x')</script>".to_string();
        appointment.message = "Tom & Jerry".to_string();

        let customer = customer_confirmation(&appointment);
        assert!(!customer.html_body.contains("<script>"));
        assert!(customer
            .html_body
            .contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));

        let operator = operator_alert(&appointment, "owner@example.com", "000001");
        assert!(operator.html_body.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn booking_reference_has_six_digits() {
        let reference = booking_reference();
        assert_eq!(reference.len(), 6);
        assert!(reference.chars().all(|ch| ch.is_ascii_digit()));
    }
}
