use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parse error
// ---------------------------------------------------------------------------

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// What was being parsed (e.g. "meal slot").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which meal of the day a record is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    /// All slots in serving order.
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        };
        f.write_str(s)
    }
}

impl FromStr for MealSlot {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(ParseEnumError::new("meal slot", other)),
        }
    }
}

// ---------------------------------------------------------------------------

/// Diet class of a single dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietClass {
    Veg,
    NonVeg,
}

impl fmt::Display for DietClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Veg => "veg",
            Self::NonVeg => "non-veg",
        };
        f.write_str(s)
    }
}

impl FromStr for DietClass {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "veg" => Ok(Self::Veg),
            "non-veg" => Ok(Self::NonVeg),
            other => Err(ParseEnumError::new("diet class", other)),
        }
    }
}

// ---------------------------------------------------------------------------

/// Coarse cost classification. Ordered cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    /// Estimated cost of a full day of meals at this tier, in rupees.
    pub fn daily_cost(self) -> f64 {
        match self {
            Self::Low => 150.0,
            Self::Medium => 300.0,
            Self::High => 500.0,
        }
    }

    /// Estimated cost of one meal at this tier (a third of the daily cost).
    pub fn meal_cost(self) -> f64 {
        self.daily_cost() / 3.0
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for BudgetTier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseEnumError::new("budget tier", other)),
        }
    }
}

// ---------------------------------------------------------------------------

/// How demanding a dish is to cook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        };
        f.write_str(s)
    }
}

impl FromStr for Complexity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "moderate" => Ok(Self::Moderate),
            "complex" => Ok(Self::Complex),
            other => Err(ParseEnumError::new("complexity", other)),
        }
    }
}

// ---------------------------------------------------------------------------

/// Grocery category of an ingredient.
///
/// The known variants are declared in shopping-list precedence order.
/// Catalog files may name categories outside that set; those become
/// [`Category::Custom`] and sort after every known category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Vegetables,
    Protein,
    Grains,
    Dairy,
    Spices,
    Oils,
    Fruits,
    Nuts,
    Pantry,
    Other,
    Custom(String),
}

impl Category {
    /// Known categories in shopping-list order.
    pub const PRECEDENCE: [Category; 10] = [
        Category::Vegetables,
        Category::Protein,
        Category::Grains,
        Category::Dairy,
        Category::Spices,
        Category::Oils,
        Category::Fruits,
        Category::Nuts,
        Category::Pantry,
        Category::Other,
    ];

    /// Catalog key (e.g. `grains`).
    pub fn key(&self) -> &str {
        match self {
            Self::Vegetables => "vegetables",
            Self::Protein => "protein",
            Self::Grains => "grains",
            Self::Dairy => "dairy",
            Self::Spices => "spices",
            Self::Oils => "oils",
            Self::Fruits => "fruits",
            Self::Nuts => "nuts",
            Self::Pantry => "pantry",
            Self::Other => "other",
            Self::Custom(key) => key,
        }
    }

    /// Human-facing heading (e.g. `Grains & Carbs`).
    pub fn label(&self) -> &str {
        match self {
            Self::Vegetables => "Vegetables",
            Self::Protein => "Proteins",
            Self::Grains => "Grains & Carbs",
            Self::Dairy => "Dairy",
            Self::Spices => "Spices & Seasonings",
            Self::Oils => "Oils",
            Self::Fruits => "Fruits",
            Self::Nuts => "Nuts & Dry Fruits",
            Self::Pantry => "Pantry Staples",
            Self::Other => "Other",
            Self::Custom(key) => key,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "vegetables" => Self::Vegetables,
            "protein" => Self::Protein,
            "grains" => Self::Grains,
            "dairy" => Self::Dairy,
            "spices" => Self::Spices,
            "oils" => Self::Oils,
            "fruits" => Self::Fruits,
            "nuts" => Self::Nuts,
            "pantry" => Self::Pantry,
            "other" | "" => Self::Other,
            _ => Self::Custom(s.trim().to_owned()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.key().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A suggested ingredient swap attached to a meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub original: String,
    pub replacement: String,
    pub note: String,
}

/// An immutable catalog entry describing one dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealRecord {
    /// Unique id within the catalog (e.g. `b1`).
    pub id: String,
    pub name: String,
    pub slot: MealSlot,
    pub diet: DietClass,
    /// Ordered, non-empty, no duplicates (enforced at catalog load).
    pub ingredients: Vec<String>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub budget_tier: BudgetTier,
    pub complexity: Complexity,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
}

/// Ingredient name equality, ignoring case in any script.
pub fn same_ingredient(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl MealRecord {
    /// Prep plus cook time.
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes + self.cook_time_minutes
    }

    /// Case-insensitive exact ingredient membership.
    pub fn has_ingredient(&self, name: &str) -> bool {
        self.ingredients
            .iter()
            .any(|ing| same_ingredient(ing, name))
    }

    /// True if any ingredient matches any of `names` (case-insensitive).
    pub fn uses_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.has_ingredient(n.as_ref()))
    }
}
