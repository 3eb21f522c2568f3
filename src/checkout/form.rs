//! Checkout form fields and the local checks run before anything leaves the client.

use crate::geocoding::SelectedAddress;
use crate::model::CartItem;
use thiserror::Error;

/// Delivery speed offered at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShippingMethod {
    SuperFast,
    #[default]
    Express4h,
    Standard,
}

impl ShippingMethod {
    pub const ALL: [ShippingMethod; 3] = [Self::SuperFast, Self::Express4h, Self::Standard];

    pub fn code(self) -> &'static str {
        match self {
            Self::SuperFast => "super_fast",
            Self::Express4h => "express_4h",
            Self::Standard => "standard",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.code() == code)
    }

    /// Fee in VND.
    pub fn fee(self) -> f64 {
        match self {
            Self::SuperFast => 50_000.0,
            Self::Express4h => 30_000.0,
            Self::Standard => 20_000.0,
        }
    }
}

/// Why the form cannot be submitted. `Display` is the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter the receiver's name")]
    MissingReceiverName,
    #[error("Please enter a phone number")]
    MissingReceiverPhone,
    #[error("The email address is not valid")]
    InvalidEmail,
    #[error("Please enter the detailed address")]
    MissingDeliveryAddress,
    #[error("Please choose a ward")]
    MissingWard,
    #[error("Please choose a city")]
    MissingCity,
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please select an address from the suggestion list")]
    NoSelectedAddress,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub receiver_email: Option<String>,
    pub delivery_address: String,
    pub ward: String,
    pub city: String,
    pub order_note: Option<String>,
    pub shipping_method: ShippingMethod,
}

impl CheckoutForm {
    /// Fill the address fields from a picked suggestion, keeping what it lacks.
    pub fn apply_selection(&mut self, selected: &SelectedAddress) {
        self.delivery_address = selected.street.clone();
        if let Some(ward) = &selected.ward {
            self.ward = ward.clone();
        }
        if let Some(city) = &selected.city {
            self.city = city.clone();
        }
    }

    /// Field checks in the order the form shows them.
    pub fn validate(&self) -> Result<(), FormError> {
        if is_blank(&self.receiver_name) {
            return Err(FormError::MissingReceiverName);
        }
        if is_blank(&self.receiver_phone) {
            return Err(FormError::MissingReceiverPhone);
        }
        if let Some(email) = self.receiver_email.as_deref().filter(|e| !is_blank(e)) {
            if !looks_like_email(email.trim()) {
                return Err(FormError::InvalidEmail);
            }
        }
        if is_blank(&self.delivery_address) {
            return Err(FormError::MissingDeliveryAddress);
        }
        if is_blank(&self.ward) {
            return Err(FormError::MissingWard);
        }
        if is_blank(&self.city) {
            return Err(FormError::MissingCity);
        }
        Ok(())
    }

    /// Everything that must hold before the address is sent for validation.
    pub fn ready(&self, items: &[CartItem], selected: Option<&SelectedAddress>) -> Result<(), FormError> {
        self.validate()?;
        if items.is_empty() {
            return Err(FormError::EmptyCart);
        }
        match selected {
            Some(selected) if self.matches_selection(selected) => Ok(()),
            _ => Err(FormError::NoSelectedAddress),
        }
    }

    /// Whether the address fields still describe `selected`. Editing the street, or a
    /// ward/city the suggestion supplied, invalidates the selection.
    pub fn matches_selection(&self, selected: &SelectedAddress) -> bool {
        let same = |field: &str, picked: &str| field.trim() == picked.trim();
        same(&self.delivery_address, &selected.street)
            && selected.ward.as_deref().map_or(true, |ward| same(&self.ward, ward))
            && selected.city.as_deref().map_or(true, |city| same(&self.city, city))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `local@domain.tld`, no whitespace, exactly one `@`.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn filled() -> CheckoutForm {
        CheckoutForm {
            receiver_name: "Lan".into(),
            receiver_phone: "0901234567".into(),
            receiver_email: None,
            delivery_address: "123 Nguyễn Huệ".into(),
            ward: "Bến Nghé".into(),
            city: "Hồ Chí Minh".into(),
            order_note: None,
            shipping_method: ShippingMethod::default(),
        }
    }

    #[rstest]
    #[case("lan@example.com", true)]
    #[case("a.b@shop.vn", true)]
    #[case("lan@example", false)]
    #[case("@example.com", false)]
    #[case("lan@@example.com", false)]
    #[case("lan @example.com", false)]
    #[case("lan@.com", false)]
    fn test_email_shape(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(looks_like_email(email), valid);
    }

    #[test]
    fn test_checks_run_in_form_order() {
        let mut form = filled();
        form.receiver_name = " ".into();
        form.city.clear();
        assert_eq!(form.validate(), Err(FormError::MissingReceiverName));

        let mut form = filled();
        form.receiver_email = Some("not-an-email".into());
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));

        let mut form = filled();
        form.receiver_email = Some("  ".into());
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_shipping_methods() {
        assert_eq!(ShippingMethod::default().fee(), 30_000.0);
        assert_eq!(ShippingMethod::from_code("super_fast"), Some(ShippingMethod::SuperFast));
        assert_eq!(ShippingMethod::from_code("drone"), None);
    }

    fn picked(street: &str, ward: Option<&str>, city: Option<&str>) -> SelectedAddress {
        use crate::geocoding::{AddressSuggestion, StructuredAddress};
        SelectedAddress {
            suggestion: AddressSuggestion {
                place_id: 1,
                label: street.to_string(),
                latitude: 10.7769,
                longitude: 106.7009,
                address: StructuredAddress::default(),
            },
            street: street.to_string(),
            ward: ward.map(str::to_string),
            city: city.map(str::to_string),
        }
    }

    fn line() -> CartItem {
        CartItem {
            cart_item_id: "local_1_p1".into(),
            product_id: "p1".into(),
            product_name: "Burger".into(),
            product_price: 45_000.0,
            total_price: 45_000.0,
            quantity: 1,
            images: vec![],
            discount: None,
        }
    }

    #[rstest]
    #[case("123 Nguyễn Huệ", Some("Bến Nghé"), Some("Hồ Chí Minh"), true)]
    #[case(" 123 Nguyễn Huệ ", None, None, true)]
    #[case("99 Trần Hưng Đạo", Some("Bến Nghé"), Some("Hồ Chí Minh"), false)]
    #[case("123 Nguyễn Huệ", Some("Bến Thành"), None, false)]
    #[case("123 Nguyễn Huệ", None, Some("Hà Nội"), false)]
    fn test_form_must_match_selection(
        #[case] street: &str,
        #[case] ward: Option<&str>,
        #[case] city: Option<&str>,
        #[case] ok: bool,
    ) {
        let selected = picked(street, ward, city);
        let result = filled().ready(&[line()], Some(&selected));
        assert_eq!(result.is_ok(), ok);
        if !ok {
            assert_eq!(result, Err(FormError::NoSelectedAddress));
        }
    }

    #[test]
    fn test_missing_selection_message() {
        assert_eq!(
            filled().ready(&[], None).unwrap_err(),
            FormError::EmptyCart
        );
        assert_eq!(
            FormError::NoSelectedAddress.to_string(),
            "Please select an address from the suggestion list"
        );
    }
}
