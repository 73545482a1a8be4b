//! Ordered keyword rules mapping merchant text to expense categories.
//!
//! No model needed: plain substring tables cover the merchants that
//! actually appear in Indian bank SMS. The if-chain order IS the
//! precedence: "Apollo Pharmacy Store" must land on Health, not
//! Shopping, and "Hotstar via Airtel" on Entertainment, not Bills, so
//! the specific rules sit above the generic ones.

use kharcha_core::text::normalize;
use kharcha_core::ExpenseCategory;

const FOOD: &[&str] = &[
    "swiggy",
    "zomato",
    "jiomart",
    "bigbasket",
    "blinkit",
    "zepto",
    "dominos",
    "pizza",
    "mcdonald",
    "kfc",
    "burger",
    "starbucks",
    "cafe",
    "coffee",
    "chai",
    "biryani",
    "restaurant",
    "dhaba",
    "bakery",
    "sweets",
    "kitchen",
    "dining",
    "grocery",
];

const HEALTH: &[&str] = &[
    "pharmacy",
    "apollo",
    "medplus",
    "netmeds",
    "pharmeasy",
    "1mg",
    "hospital",
    "clinic",
    "diagnostic",
    "pathlabs",
    "medical",
    "medicine",
    "dental",
    "doctor",
    "chemist",
    "wellness",
];

const TRANSPORT: &[&str] = &[
    "uber",
    "ola",
    "rapido",
    "metro",
    "irctc",
    "redbus",
    "fuel",
    "petrol",
    "diesel",
    "fastag",
    "parking",
    "toll",
    "cab",
    "taxi",
    "train",
    "flight",
    "indigo",
    "spicejet",
    "vistara",
];

const ENTERTAINMENT: &[&str] = &[
    "netflix",
    "prime video",
    "hotstar",
    "disney",
    "sonyliv",
    "zee5",
    "jiocinema",
    "spotify",
    "gaana",
    "wynk",
    "bookmyshow",
    "pvr",
    "inox",
    "cinema",
    "movie",
    "youtube",
    "game",
];

const EDUCATION: &[&str] = &[
    "school",
    "college",
    "university",
    "tuition",
    "course",
    "udemy",
    "coursera",
    "byjus",
    "unacademy",
    "vedantu",
    "academy",
    "institute",
    "exam",
];

const BILLS: &[&str] = &[
    "electricity",
    "bescom",
    "broadband",
    "wifi",
    "airtel",
    "jio",
    "vodafone",
    "bsnl",
    "dth",
    "tata sky",
    "tatasky",
    "recharge",
    "postpaid",
    "landline",
    "lpg",
    "indane",
    "bharatgas",
    "emi",
    "insurance",
    "premium",
    "bill",
];

const SHOPPING: &[&str] = &[
    "amazon",
    "flipkart",
    "myntra",
    "ajio",
    "nykaa",
    "meesho",
    "snapdeal",
    "tatacliq",
    "decathlon",
    "ikea",
    "croma",
    "reliance",
    "dmart",
    "bazaar",
    "lifestyle",
    "westside",
    "pantaloons",
    "zudio",
    "mall",
    "store",
    "mart",
    "shop",
    "retail",
];

fn any_of(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Map merchant text (or the raw message when no merchant was
/// extracted) to an expense category. First matching rule wins; empty
/// or unknown input falls through to Other.
pub fn classify_expense(text: &str) -> ExpenseCategory {
    let text = normalize(text);
    if text.is_empty() {
        return ExpenseCategory::Other;
    }

    if any_of(&text, FOOD) {
        return ExpenseCategory::Food;
    }
    if any_of(&text, HEALTH) {
        return ExpenseCategory::Health;
    }
    if any_of(&text, TRANSPORT) {
        return ExpenseCategory::Transport;
    }
    if any_of(&text, ENTERTAINMENT) {
        return ExpenseCategory::Entertainment;
    }
    if any_of(&text, EDUCATION) {
        return ExpenseCategory::Education;
    }
    if any_of(&text, BILLS) {
        return ExpenseCategory::Bills;
    }
    if any_of(&text, SHOPPING) {
        return ExpenseCategory::Shopping;
    }

    ExpenseCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_merchants() {
        assert_eq!(classify_expense("Starbucks"), ExpenseCategory::Food);
        assert_eq!(classify_expense("SWIGGY BANGALORE"), ExpenseCategory::Food);
        assert_eq!(classify_expense("Uber Trip"), ExpenseCategory::Transport);
        assert_eq!(classify_expense("IRCTC"), ExpenseCategory::Transport);
        assert_eq!(classify_expense("BYJUS"), ExpenseCategory::Education);
        assert_eq!(classify_expense("DMart"), ExpenseCategory::Shopping);
        assert_eq!(classify_expense("Netflix"), ExpenseCategory::Entertainment);
        assert_eq!(classify_expense("MedPlus"), ExpenseCategory::Health);
    }

    #[test]
    fn test_rule_order_breaks_collisions() {
        // Health sits above Shopping, so "Store" does not win here.
        assert_eq!(classify_expense("Apollo Pharmacy Store"), ExpenseCategory::Health);
        // Entertainment sits above Bills, so "Airtel" does not win.
        assert_eq!(classify_expense("Hotstar via Airtel"), ExpenseCategory::Entertainment);
        // "Jio" pulls recharges into Bills, but the retail arm stays Shopping.
        assert_eq!(classify_expense("Reliance Jio Recharge"), ExpenseCategory::Bills);
        assert_eq!(classify_expense("Reliance Store"), ExpenseCategory::Shopping);
        // Grocery delivery beats the bare "jio" rule.
        assert_eq!(classify_expense("JioMart Grocery"), ExpenseCategory::Food);
    }

    #[test]
    fn test_default_and_idempotence() {
        assert_eq!(classify_expense(""), ExpenseCategory::Other);
        assert_eq!(classify_expense("   "), ExpenseCategory::Other);
        assert_eq!(classify_expense("Ramesh Kumar"), ExpenseCategory::Other);

        let first = classify_expense("Cafe Coffee Day");
        let second = classify_expense("Cafe Coffee Day");
        assert_eq!(first, second);
        assert_eq!(first, ExpenseCategory::Food);
    }
}
