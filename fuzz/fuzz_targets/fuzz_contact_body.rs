#![no_main]

use libfuzzer_sys::fuzz_target;
use reel_contact::{FormKind, MailerConfig, MockMailer, handle};

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };
    let config = MailerConfig::new("inbox@agency.test", "site@agency.test");

    for kind in [FormKind::Contact, FormKind::GetStarted] {
        let mailer = MockMailer::new();
        let response = handle("POST", body, kind, &mailer, Some(&config));
        assert!(response.status == 200 || response.status == 400);
        assert_eq!(response.is_success(), mailer.sent().len() == 1);

        // User values never reach the HTML part unescaped.
        for email in mailer.sent() {
            assert!(!email.html.contains("<script"));
        }
    }
});
