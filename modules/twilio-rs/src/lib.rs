// Minimal Twilio Messages API client for lead alerts.

use std::collections::HashMap;

pub mod models;
use reqwest::{header, Client};

use crate::models::MessageResponse;

/// Check if a string is a valid phone number (E.164 format)
fn is_phone_number(identifier: &str) -> bool {
    identifier.starts_with('+') && identifier.len() >= 10
}

/// Render a named message template with positional parameters.
/// Unknown template names fall back to joining the parameters.
fn render_template(name: &str, params: &[String]) -> String {
    match name {
        "new_lead_alert" => {
            let company = params.first().map(String::as_str).unwrap_or("Unknown Company");
            let confidence = params.get(1).map(String::as_str).unwrap_or("0.0");
            let signal_type = params.get(2).map(String::as_str).unwrap_or("General");
            format!(
                "New lead: {company} (score {confidence}, via {signal_type}). \
                 Open FuelPulse for details."
            )
        }
        _ => params.join(" "),
    }
}

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender: an E.164 number or a `whatsapp:+...` address.
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self { options }
    }

    /// Send a templated message to one recipient. Returns the message
    /// metadata Twilio reports back.
    pub async fn send_template(
        &self,
        recipient: &str,
        template_name: &str,
        params: &[String],
    ) -> Result<MessageResponse, &'static str> {
        let account_sid = self.options.account_sid.clone();
        let auth_token = self.options.auth_token.clone();

        if !is_phone_number(recipient) {
            eprintln!("Invalid recipient format: {}", recipient);
            eprintln!("Expected E.164 phone (+1234567890)");
            return Err("Invalid recipient format");
        }

        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{sid}/Messages.json",
            sid = account_sid
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "Content-Type",
            "application/x-www-form-urlencoded"
                .parse()
                .expect("Header value should parse correctly"),
        );

        let body = render_template(template_name, params);
        let mut form_body: HashMap<&str, String> = HashMap::new();
        form_body.insert("To", recipient.to_string());
        form_body.insert("From", self.options.from.clone());
        form_body.insert("Body", body);

        let client = Client::new();
        let res = client
            .post(url)
            .basic_auth(account_sid, Some(auth_token))
            .headers(headers)
            .form(&form_body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Twilio error ({}): {}", status, error_body);

                    // Parse error to provide more helpful messages
                    if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_body) {
                        if let Some(code) = error_json.get("code").and_then(|c| c.as_i64()) {
                            match code {
                                20003 => {
                                    eprintln!("Authentication failed — check TWILIO_ACCOUNT_SID / TWILIO_AUTH_TOKEN");
                                    return Err("Twilio authentication failed");
                                }
                                21211 => {
                                    eprintln!("Recipient number rejected by Twilio: {}", recipient);
                                    return Err("Invalid recipient number");
                                }
                                21608 => {
                                    eprintln!("Unverified recipient on a trial account");
                                    return Err("Recipient not verified");
                                }
                                _ => return Err("Twilio returned an error"),
                            }
                        }
                    }

                    return Err("Twilio returned an error");
                }

                let result = response.json::<MessageResponse>().await;
                match result {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        eprintln!("Failed to parse Twilio response: {}", e);
                        Err("Error parsing message response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Twilio failed: {}", e);
                Err("Error sending message")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_phone_number() {
        // Valid E.164 phone numbers
        assert!(is_phone_number("+1234567890"));
        assert!(is_phone_number("+15551234567"));
        assert!(is_phone_number("+919876543210"));

        // Invalid phone numbers
        assert!(!is_phone_number("1234567890")); // Missing +
        assert!(!is_phone_number("+123")); // Too short
        assert!(!is_phone_number("user@example.com")); // Email
    }

    #[test]
    fn test_render_new_lead_alert() {
        let body = render_template(
            "new_lead_alert",
            &["Tata Power".to_string(), "0.85".to_string(), "tender".to_string()],
        );
        assert!(body.contains("Tata Power"));
        assert!(body.contains("0.85"));
        assert!(body.contains("tender"));
    }

    #[test]
    fn test_render_unknown_template_joins_params() {
        let body = render_template("nope", &["a".to_string(), "b".to_string()]);
        assert_eq!(body, "a b");
    }
}
