// Field Validators - Reusable validation components
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Range validator for numeric types
#[derive(Debug, Clone)]
pub struct RangeValidator<T> {
    min: Option<T>,
    max: Option<T>,
    exclusive_min: bool,
}

impl<T> Default for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    /// Create a new range validator with no constraints
    pub fn new() -> Self {
        Self { min: None, max: None, exclusive_min: false }
    }

    /// Set minimum value (inclusive)
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self.exclusive_min = false;
        self
    }

    /// Require values strictly greater than `min`
    pub fn greater_than(mut self, min: T) -> Self {
        self.min = Some(min);
        self.exclusive_min = true;
        self
    }

    /// Set maximum value
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        if let Some(ref min) = self.min {
            if self.exclusive_min && value <= min {
                return Err(format!("Value must be greater than {min}"));
            }
            if !self.exclusive_min && value < min {
                return Err(format!("Value must be at least {min}"));
            }
        }

        if let Some(ref max) = self.max {
            if value > max {
                return Err(format!("Value must not exceed {max}"));
            }
        }

        Ok(())
    }
}

/// String validator with various constraints
#[derive(Debug, Clone)]
pub struct StringValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<regex::Regex>,
    not_empty: bool,
    trim: bool,
    message: Option<String>,
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringValidator {
    /// Create a new string validator
    pub fn new() -> Self {
        Self {
            min_length: None,
            max_length: None,
            pattern: None,
            not_empty: false,
            trim: true,
            message: None,
        }
    }

    /// Require non-empty string
    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Set minimum length (in characters)
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set maximum length (in characters)
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set pattern to match
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(regex::Regex::new(pattern)?);
        Ok(self)
    }

    /// Use an already compiled pattern
    pub fn compiled_pattern(mut self, pattern: regex::Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Set whether to trim before validation
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Replace the generic failure messages with a single user-facing one
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn check(&self, value: &str) -> Result<(), String> {
        let val = if self.trim { value.trim() } else { value };
        let len = val.chars().count();

        if self.not_empty && val.is_empty() {
            return Err("Value cannot be empty".to_string());
        }

        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("Length must be at least {min} characters"));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("Length must not exceed {max} characters"));
            }
        }

        if let Some(ref pattern) = self.pattern {
            if !pattern.is_match(val) {
                return Err(format!("Value must match pattern: {}", pattern.as_str()));
            }
        }

        Ok(())
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        self.check(value).map_err(|generic| self.message.clone().unwrap_or(generic))
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// Collection validator for slices of items
#[derive(Debug, Clone, Default)]
pub struct CollectionValidator {
    min_size: Option<usize>,
    max_size: Option<usize>,
    unique_items: bool,
}

impl CollectionValidator {
    /// Create a new collection validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum size
    pub fn min_size(mut self, min: usize) -> Self {
        self.min_size = Some(min);
        self
    }

    /// Set maximum size
    pub fn max_size(mut self, max: usize) -> Self {
        self.max_size = Some(max);
        self
    }

    /// Require unique items
    pub fn unique_items(mut self) -> Self {
        self.unique_items = true;
        self
    }
}

impl<T> FieldValidator<[T]> for CollectionValidator
where
    T: Eq + Hash + Display,
{
    fn validate(&self, value: &[T]) -> Result<(), String> {
        if let Some(min) = self.min_size {
            if value.len() < min {
                return Err(format!("Collection must contain at least {min} items"));
            }
        }

        if let Some(max) = self.max_size {
            if value.len() > max {
                return Err(format!("Collection must not exceed {max} items"));
            }
        }

        if self.unique_items {
            let mut seen = HashSet::with_capacity(value.len());
            for item in value {
                if !seen.insert(item) {
                    return Err(format!("Duplicate item: {item}"));
                }
            }
        }

        Ok(())
    }
}
