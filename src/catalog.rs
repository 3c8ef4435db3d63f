/// Ingredients offered for selection out of the box
pub const INGREDIENTS: &[&str] = &[
    "bacon",
    "beef",
    "butter",
    "carrot",
    "cheese",
    "chicken",
    "egg",
    "garlic",
    "lettuce",
    "milk",
    "mushroom",
    "olive oil",
    "onion",
    "pasta",
    "peppers",
    "potato",
    "rice",
    "salmon",
    "shrimp",
    "spinach",
    "tomato",
    "yogurt",
];

pub const SPICES: &[&str] = &[
    "basil",
    "black pepper",
    "cinnamon",
    "coriander",
    "cumin",
    "oregano",
    "paprika",
    "parsley",
    "salt",
    "thyme",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_are_sorted_and_unique() {
        for list in [INGREDIENTS, SPICES] {
            let mut sorted = list.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted, list);
        }
    }

    #[test]
    fn test_no_overlap() {
        assert!(INGREDIENTS.iter().all(|i| !SPICES.contains(i)));
    }
}
