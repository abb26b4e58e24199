//! Species taxonomy and record dispatch.

/// Closed species taxonomy. Records whose species label matches no
/// variant get [`Species::Other`], which carries the base normalization
/// behavior unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Cat,
    Dog,
    Rabbit,
    SmallFurry,
    BarnYard,
    Bird,
    Horse,
    Pig,
    Reptile,
    Other,
}

impl Species {
    /// Canonicalize a free-text species label: title-case each word and
    /// keep letters only, so `"small & furry"` becomes `"SmallFurry"`.
    pub fn canonical_name(label: &str) -> String {
        let mut out = String::with_capacity(label.len());
        let mut word_start = true;
        for ch in label.chars() {
            if ch.is_alphabetic() {
                if word_start {
                    out.extend(ch.to_uppercase());
                } else {
                    out.extend(ch.to_lowercase());
                }
                word_start = false;
            } else {
                word_start = true;
            }
        }
        out
    }

    /// Route a species label to its normalizer variant by exact
    /// canonical-name match.
    pub fn dispatch(label: &str) -> Species {
        match Self::canonical_name(label).as_str() {
            "Cat" => Species::Cat,
            "Dog" => Species::Dog,
            "Rabbit" => Species::Rabbit,
            "SmallFurry" => Species::SmallFurry,
            "BarnYard" => Species::BarnYard,
            "Bird" => Species::Bird,
            "Horse" => Species::Horse,
            "Pig" => Species::Pig,
            "Reptile" => Species::Reptile,
            _ => Species::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_strips_non_letters() {
        assert_eq!(Species::canonical_name("Small & Furry"), "SmallFurry");
        assert_eq!(Species::canonical_name("small & furry"), "SmallFurry");
        assert_eq!(Species::canonical_name("Barn Yard"), "BarnYard");
        assert_eq!(Species::canonical_name("CAT"), "Cat");
    }

    #[test]
    fn test_dispatch_known_species() {
        assert_eq!(Species::dispatch("Cat"), Species::Cat);
        assert_eq!(Species::dispatch("dog"), Species::Dog);
        assert_eq!(Species::dispatch("Small & Furry"), Species::SmallFurry);
        assert_eq!(Species::dispatch("Barn Yard"), Species::BarnYard);
    }

    #[test]
    fn test_dispatch_falls_back_to_base() {
        assert_eq!(Species::dispatch("Llama"), Species::Other);
        assert_eq!(Species::dispatch(""), Species::Other);
    }
}
