//! Product form parsing and validation.
//!
//! The product create/edit form and the CLI seeder both funnel through
//! [`ProductForm::validate`], so every write to the catalog obeys the same
//! rules. Numeric fields arrive as strings (multipart gives us nothing else)
//! and parse here.

use rust_decimal::Decimal;

use marigold_core::CATEGORIES;

/// Raw product fields as submitted.
///
/// `sizes` and `colours` are comma-separated text inputs; `images` collects
/// retained hosted URLs plus any freshly uploaded ones.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub rating: String,
    pub category: String,
    pub sizes: String,
    pub colours: String,
    pub images: Vec<String>,
}

/// A product that passed validation, ready for the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub rating: Decimal,
    pub category: String,
    pub sizes: Vec<String>,
    pub colours: Vec<String>,
    pub images: Vec<String>,
}

/// Per-field validation failures, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// Whether any field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message for a field, when it failed.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, message)| message.as_str())
    }

    /// All failures, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ProductForm {
    /// Validate the form, producing a write-ready product or field errors.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` listing every failed field; the form
    /// re-renders with these alongside the submitted values.
    pub fn validate(&self) -> Result<ValidProduct, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title", "Title is required");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push("description", "Description is required");
        }

        let price = match self.price.trim().parse::<Decimal>() {
            Ok(p) if p >= Decimal::ZERO => Some(p),
            Ok(_) => {
                errors.push("price", "Price cannot be negative");
                None
            }
            Err(_) => {
                errors.push("price", "Price must be a number");
                None
            }
        };

        let rating = match self.rating.trim().parse::<Decimal>() {
            Ok(r) if r >= Decimal::ZERO && r <= Decimal::from(5) => Some(r),
            Ok(_) => {
                errors.push("rating", "Rating must be between 0 and 5");
                None
            }
            Err(_) => {
                errors.push("rating", "Rating must be a number");
                None
            }
        };

        let category = self.category.trim().to_lowercase();
        if !CATEGORIES.contains(&category.as_str()) {
            errors.push(
                "category",
                format!("Category must be one of: {}", CATEGORIES.join(", ")),
            );
        }

        let sizes = split_list(&self.sizes);
        if sizes.is_empty() {
            errors.push("sizes", "At least one size is required");
        }

        let colours = split_list(&self.colours);
        if colours.is_empty() {
            errors.push("colours", "At least one colour is required");
        }

        let images: Vec<String> = self
            .images
            .iter()
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .collect();
        if images.is_empty() {
            errors.push("images", "At least one image is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Both unwraps are guarded by the error pushes above.
        #[allow(clippy::unwrap_used)]
        Ok(ValidProduct {
            title: title.to_owned(),
            description: description.to_owned(),
            price: price.unwrap(),
            rating: rating.unwrap(),
            category,
            sizes,
            colours,
            images,
        })
    }
}

/// Split a comma-separated input, trimming entries and dropping empties.
fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            title: "Marigold Anarkali".to_string(),
            description: "Festive anarkali kurti in marigold yellow".to_string(),
            price: "1499.50".to_string(),
            rating: "4.5".to_string(),
            category: "kurti".to_string(),
            sizes: "S, M, L".to_string(),
            colours: "Yellow, Rose".to_string(),
            images: vec!["https://img.example/anarkali.jpg".to_string()],
        }
    }

    #[test]
    fn valid_form_passes() {
        let product = valid_form().validate().unwrap();
        assert_eq!(product.title, "Marigold Anarkali");
        assert_eq!(product.price, "1499.50".parse().unwrap());
        assert_eq!(product.sizes, vec!["S", "M", "L"]);
        assert_eq!(product.colours, vec!["Yellow", "Rose"]);
    }

    #[test]
    fn blank_title_and_description_fail() {
        let mut form = valid_form();
        form.title = "   ".to_string();
        form.description = String::new();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("title"), Some("Title is required"));
        assert_eq!(errors.field("description"), Some("Description is required"));
    }

    #[test]
    fn negative_price_fails() {
        let mut form = valid_form();
        form.price = "-1".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("price"), Some("Price cannot be negative"));
    }

    #[test]
    fn zero_price_is_allowed() {
        let mut form = valid_form();
        form.price = "0".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn unparseable_price_fails() {
        let mut form = valid_form();
        form.price = "twelve".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("price"), Some("Price must be a number"));
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        let mut form = valid_form();
        form.rating = "0".to_string();
        assert!(form.validate().is_ok());
        form.rating = "5".to_string();
        assert!(form.validate().is_ok());
        form.rating = "5.1".to_string();
        assert!(form.validate().is_err());
        form.rating = "-0.1".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn unknown_category_fails() {
        let mut form = valid_form();
        form.category = "saree".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.field("category").unwrap().contains("frock"));
    }

    #[test]
    fn category_is_case_insensitive() {
        let mut form = valid_form();
        form.category = "Lehenga".to_string();
        let product = form.validate().unwrap();
        assert_eq!(product.category, "lehenga");
    }

    #[test]
    fn sizes_and_colours_drop_empty_entries() {
        let mut form = valid_form();
        form.sizes = " S ,, M ,".to_string();
        let product = form.validate().unwrap();
        assert_eq!(product.sizes, vec!["S", "M"]);
    }

    #[test]
    fn all_empty_entries_means_no_sizes() {
        let mut form = valid_form();
        form.sizes = " , ,".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("sizes"), Some("At least one size is required"));
    }

    #[test]
    fn no_images_fails() {
        let mut form = valid_form();
        form.images = vec!["  ".to_string()];
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.field("images"),
            Some("At least one image is required")
        );
    }

    #[test]
    fn errors_keep_form_order() {
        let form = ProductForm::default();
        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            vec![
                "title",
                "description",
                "price",
                "rating",
                "category",
                "sizes",
                "colours",
                "images"
            ]
        );
    }
}
