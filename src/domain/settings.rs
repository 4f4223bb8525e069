use bigdecimal::{BigDecimal, Zero};

use super::errors::DomainError;
use super::limits::{
    check_len, check_opt_len, MAX_ADDRESS_LEN, MAX_CODE_LEN, MAX_CURRENCY_LEN, MAX_NAME_LEN,
    MAX_OPTION_LEN,
};

#[derive(Debug, Clone, PartialEq)]
pub struct KotConfig {
    pub print_by_department: bool,
    pub number_of_copies: i32,
    pub selected_printer: Option<String>,
    pub paper_size: Option<String>,
    pub format_type: Option<String>,
}

impl Default for KotConfig {
    fn default() -> Self {
        Self {
            print_by_department: false,
            number_of_copies: 1,
            selected_printer: None,
            paper_size: None,
            format_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillConfig {
    pub auto_print_dine_in: bool,
    pub auto_print_takeaway: bool,
    pub number_of_copies: i32,
    pub selected_printer: Option<String>,
    pub paper_size: Option<String>,
    pub format_type: Option<String>,
}

impl Default for BillConfig {
    fn default() -> Self {
        Self {
            auto_print_dine_in: false,
            auto_print_takeaway: false,
            number_of_copies: 1,
            selected_printer: None,
            paper_size: None,
            format_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantSettings {
    pub restaurant_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub currency: String,
    pub tax_rate: BigDecimal,
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        Self {
            restaurant_name: "My Restaurant".to_string(),
            address: None,
            phone: None,
            email: None,
            currency: "INR".to_string(),
            tax_rate: BigDecimal::from(5),
        }
    }
}

// Patches: an outer `None` keeps the stored value, `Some(None)` clears an
// optional field.

#[derive(Debug, Clone, Default)]
pub struct KotConfigPatch {
    pub print_by_department: Option<bool>,
    pub number_of_copies: Option<i32>,
    pub selected_printer: Option<Option<String>>,
    pub paper_size: Option<Option<String>>,
    pub format_type: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct BillConfigPatch {
    pub auto_print_dine_in: Option<bool>,
    pub auto_print_takeaway: Option<bool>,
    pub number_of_copies: Option<i32>,
    pub selected_printer: Option<Option<String>>,
    pub paper_size: Option<Option<String>>,
    pub format_type: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantSettingsPatch {
    pub restaurant_name: Option<String>,
    pub address: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub currency: Option<String>,
    pub tax_rate: Option<BigDecimal>,
}

impl KotConfig {
    pub fn apply(mut self, patch: KotConfigPatch) -> Result<Self, DomainError> {
        if let Some(v) = patch.print_by_department {
            self.print_by_department = v;
        }
        if let Some(v) = patch.number_of_copies {
            self.number_of_copies = validate_copies(v)?;
        }
        if let Some(v) = patch.selected_printer {
            self.selected_printer = v;
        }
        if let Some(v) = patch.paper_size {
            self.paper_size = v;
        }
        if let Some(v) = patch.format_type {
            self.format_type = v;
        }
        check_printer_fields(&self.selected_printer, &self.paper_size, &self.format_type)?;
        Ok(self)
    }
}

impl BillConfig {
    pub fn apply(mut self, patch: BillConfigPatch) -> Result<Self, DomainError> {
        if let Some(v) = patch.auto_print_dine_in {
            self.auto_print_dine_in = v;
        }
        if let Some(v) = patch.auto_print_takeaway {
            self.auto_print_takeaway = v;
        }
        if let Some(v) = patch.number_of_copies {
            self.number_of_copies = validate_copies(v)?;
        }
        if let Some(v) = patch.selected_printer {
            self.selected_printer = v;
        }
        if let Some(v) = patch.paper_size {
            self.paper_size = v;
        }
        if let Some(v) = patch.format_type {
            self.format_type = v;
        }
        check_printer_fields(&self.selected_printer, &self.paper_size, &self.format_type)?;
        Ok(self)
    }
}

impl RestaurantSettings {
    pub fn apply(mut self, patch: RestaurantSettingsPatch) -> Result<Self, DomainError> {
        if let Some(name) = patch.restaurant_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::InvalidInput(
                    "Restaurant name is required".to_string(),
                ));
            }
            self.restaurant_name = name.to_string();
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(currency) = patch.currency {
            let currency = currency.trim();
            if currency.is_empty() {
                return Err(DomainError::InvalidInput("Currency is required".to_string()));
            }
            self.currency = currency.to_string();
        }
        if let Some(rate) = patch.tax_rate {
            if rate < BigDecimal::zero() || rate > BigDecimal::from(100) {
                return Err(DomainError::InvalidInput(
                    "Tax rate must be between 0 and 100".to_string(),
                ));
            }
            self.tax_rate = rate;
        }
        check_len("Restaurant name", &self.restaurant_name, MAX_NAME_LEN)?;
        check_opt_len("Address", self.address.as_deref(), MAX_ADDRESS_LEN)?;
        check_opt_len("Phone", self.phone.as_deref(), MAX_CODE_LEN)?;
        check_opt_len("Email", self.email.as_deref(), MAX_NAME_LEN)?;
        check_len("Currency", &self.currency, MAX_CURRENCY_LEN)?;
        Ok(self)
    }
}

fn check_printer_fields(
    printer: &Option<String>,
    paper_size: &Option<String>,
    format_type: &Option<String>,
) -> Result<(), DomainError> {
    check_opt_len("Printer", printer.as_deref(), MAX_NAME_LEN)?;
    check_opt_len("Paper size", paper_size.as_deref(), MAX_OPTION_LEN)?;
    check_opt_len("Format type", format_type.as_deref(), MAX_OPTION_LEN)
}

fn validate_copies(copies: i32) -> Result<i32, DomainError> {
    if copies < 1 {
        return Err(DomainError::InvalidInput(
            "Number of copies must be at least 1".to_string(),
        ));
    }
    Ok(copies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run_values() {
        let kot = KotConfig::default();
        assert!(!kot.print_by_department);
        assert_eq!(kot.number_of_copies, 1);

        let settings = RestaurantSettings::default();
        assert_eq!(settings.restaurant_name, "My Restaurant");
        assert_eq!(settings.currency, "INR");
        assert_eq!(settings.tax_rate, BigDecimal::from(5));
    }

    #[test]
    fn absent_fields_are_kept_and_null_clears() {
        let current = KotConfig {
            selected_printer: Some("EPSON".to_string()),
            paper_size: Some("80mm".to_string()),
            ..KotConfig::default()
        };
        let updated = current
            .apply(KotConfigPatch {
                print_by_department: Some(true),
                selected_printer: Some(None),
                ..Default::default()
            })
            .unwrap();

        assert!(updated.print_by_department);
        assert_eq!(updated.selected_printer, None);
        assert_eq!(updated.paper_size.as_deref(), Some("80mm"));
    }

    #[test]
    fn zero_copies_is_rejected() {
        let err = BillConfig::default()
            .apply(BillConfigPatch {
                number_of_copies: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn tax_rate_out_of_range_is_rejected() {
        let result = RestaurantSettings::default().apply(RestaurantSettingsPatch {
            tax_rate: Some(BigDecimal::from(120)),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn oversized_values_are_rejected() {
        let err = KotConfig::default()
            .apply(KotConfigPatch {
                paper_size: Some(Some("A".repeat(33))),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg == "Paper size must be at most 32 characters"));

        let result = RestaurantSettings::default().apply(RestaurantSettingsPatch {
            currency: Some("RUPEES-INR".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn restaurant_patch_updates_contact_fields() {
        let updated = RestaurantSettings::default()
            .apply(RestaurantSettingsPatch {
                restaurant_name: Some(" Spice Route ".to_string()),
                phone: Some(Some("+91 98765 43210".to_string())),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.restaurant_name, "Spice Route");
        assert_eq!(updated.phone.as_deref(), Some("+91 98765 43210"));
        assert_eq!(updated.currency, "INR");
    }
}
