//! Pre-filled chat link handed to the messaging app after a contact request is stored.

use crate::forms::ValidContact;

pub const WHATSAPP_BASE: &str = "https://wa.me/";

/// The business line quote requests go to.
pub const BUSINESS_WHATSAPP: &str = "905317951590";

/// Message body; the `Mesaj:` line is left blank when there is no message.
pub fn quote_request_message(contact: &ValidContact) -> String {
    let service = contact.service_name();
    let message_line = contact.message.as_deref().map(|m| format!("Mesaj: {m}")).unwrap_or_default();
    format!(
        "Merhaba! {service} hizmeti için teklif almak istiyorum.\n\n\
         Ad: {name}\n\
         Telefon: {phone}\n\
         Hizmet: {service}\n\
         {message_line}\n\n\
         Lütfen benimle iletişime geçin. Teşekkürler!",
        name = contact.name,
        phone = contact.phone,
    )
}

/// `recipient` is an international number; anything but digits is dropped.
pub fn whatsapp_url(recipient: &str, contact: &ValidContact) -> String {
    let number: String = recipient.chars().filter(char::is_ascii_digit).collect();
    format!("{WHATSAPP_BASE}{number}?text={}", urlencoding::encode(&quote_request_message(contact)))
}

/// Link to [`BUSINESS_WHATSAPP`].
pub fn business_whatsapp_url(contact: &ValidContact) -> String {
    whatsapp_url(BUSINESS_WHATSAPP, contact)
}
