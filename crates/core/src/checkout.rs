//! WhatsApp order handoff.
//!
//! The shop takes no payments: checkout builds a pre-filled WhatsApp message
//! and sends the visitor to chat. Message shapes are load-bearing, the staff
//! answering the phone have read these exact layouts for years.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::cart::CartLine;
use crate::types::{Product, money};

/// Build the order message for a whole cart.
#[must_use]
pub fn order_message(lines: &[CartLine], total: Decimal) -> String {
    let mut message =
        String::from("Hello! 👋\n\nI'd like to place an order for the following items:\n\n");
    for (index, line) in lines.iter().enumerate() {
        let _ = write!(
            message,
            "{number}. *{title}*\n   Size: {size}, Color: {color}\n   Qty: {quantity} x ₹{price}\n\n",
            number = index + 1,
            title = line.product.title,
            size = line.size,
            color = line.color,
            quantity = line.quantity,
            price = money::format_plain(line.product.price),
        );
    }
    let _ = write!(
        message,
        "*Total Amount: {total}*\n\n",
        total = money::format_inr(total),
    );
    message.push_str("Please confirm availability and shipping details. Thank you! 😊");
    message
}

/// Build the single-product enquiry message used by Buy Now.
#[must_use]
pub fn enquiry_message(product: &Product, size: &str, color: &str) -> String {
    format!(
        "Hello! 👋\n\nI'm interested in ordering the *{title}*.\n\nSize: {size}\nColor: {color}\nPrice: ₹{price}\n\nIs this available?",
        title = product.title,
        price = money::format_plain(product.price),
    )
}

/// Build the `wa.me` link that opens a chat with the message pre-filled.
#[must_use]
pub fn whatsapp_url(phone: &str, message: &str) -> String {
    format!("https://wa.me/{phone}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{LineId, ProductId};

    fn product(id: &str, title: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_owned(),
            description: String::new(),
            price: price.parse().unwrap(),
            rating: "4".parse().unwrap(),
            category: "kurti".to_owned(),
            sizes: vec!["M".to_owned()],
            colours: vec!["Rose".to_owned()],
            images: vec!["a.jpg".to_owned()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(product: Product, size: &str, color: &str, quantity: u32) -> CartLine {
        CartLine {
            id: LineId::for_variant(&product.id, size, color),
            product,
            size: size.to_owned(),
            color: color.to_owned(),
            quantity,
        }
    }

    #[test]
    fn order_message_matches_the_established_layout() {
        let lines = vec![
            line(product("p1", "Marigold Anarkali", "1499"), "M", "Rose", 2),
            line(product("p2", "Meadow Frock", "450.50"), "S", "Teal", 1),
        ];
        let total: Decimal = "3448.50".parse().unwrap();

        let expected = "Hello! 👋\n\n\
            I'd like to place an order for the following items:\n\n\
            1. *Marigold Anarkali*\n   Size: M, Color: Rose\n   Qty: 2 x ₹1499\n\n\
            2. *Meadow Frock*\n   Size: S, Color: Teal\n   Qty: 1 x ₹450.5\n\n\
            *Total Amount: ₹3,448.5*\n\n\
            Please confirm availability and shipping details. Thank you! 😊";
        assert_eq!(order_message(&lines, total), expected);
    }

    #[test]
    fn order_total_uses_indian_grouping() {
        let lines = vec![line(product("p1", "Bridal Lehenga", "125000"), "M", "Red", 1)];
        let message = order_message(&lines, "125000".parse().unwrap());
        assert!(message.contains("*Total Amount: ₹1,25,000*"));
        assert!(message.contains("Qty: 1 x ₹125000"));
    }

    #[test]
    fn enquiry_message_matches_the_established_layout() {
        let product = product("p1", "Silk Kurti", "899");
        let expected = "Hello! 👋\n\n\
            I'm interested in ordering the *Silk Kurti*.\n\n\
            Size: L\nColor: Ivory\nPrice: ₹899\n\n\
            Is this available?";
        assert_eq!(enquiry_message(&product, "L", "Ivory"), expected);
    }

    #[test]
    fn whatsapp_url_percent_encodes_the_message() {
        let url = whatsapp_url("918854846782", "Hello! 👋 Total: ₹1,499");
        assert!(url.starts_with("https://wa.me/918854846782?text=Hello%21%20"));
        assert!(!url.contains(' '));
        assert!(!url.contains('₹'));
        assert!(url.contains("%E2%82%B9"));
    }
}
