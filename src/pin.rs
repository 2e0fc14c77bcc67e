use rand::Rng;

pub const PIN_LEN: usize = 4;

/// Generates a 4-character access PIN. One coin flip picks the alphabet for
/// the whole PIN, digits or lowercase letters, then all four characters are
/// drawn uniformly from it. Collisions across calls are acceptable; the PIN
/// gates casual joins, it is not a secret.
pub fn generate_pin<R: Rng>(rng: &mut R) -> String {
    let digits = rng.gen_bool(0.5);
    let mut pin = String::with_capacity(PIN_LEN);
    for _ in 0..PIN_LEN {
        let ch = if digits {
            char::from(b'0' + rng.gen_range(0u8..10))
        } else {
            char::from(rng.gen_range(b'a'..=b'z'))
        };
        pin.push(ch);
    }
    pin
}

pub fn random_pin() -> String {
    generate_pin(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all_digits(pin: &str) -> bool {
        pin.chars().all(|ch| ch.is_ascii_digit())
    }

    fn all_lowercase(pin: &str) -> bool {
        pin.chars().all(|ch| ch.is_ascii_lowercase())
    }

    #[test]
    fn pin_is_four_characters_from_a_single_alphabet() {
        for seed in 0..256 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pin = generate_pin(&mut rng);
            assert_eq!(pin.len(), PIN_LEN, "seed {seed} produced {pin:?}");
            assert!(
                all_digits(&pin) || all_lowercase(&pin),
                "seed {seed} mixed alphabets: {pin:?}"
            );
        }
    }

    #[test]
    fn both_alphabets_occur() {
        let mut saw_digits = false;
        let mut saw_letters = false;
        for seed in 0..256 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pin = generate_pin(&mut rng);
            saw_digits |= all_digits(&pin);
            saw_letters |= all_lowercase(&pin);
        }
        assert!(saw_digits && saw_letters);
    }

    #[test]
    fn same_seed_same_pin() {
        let first = generate_pin(&mut StdRng::seed_from_u64(42));
        let second = generate_pin(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn random_pin_is_well_formed() {
        let pin = random_pin();
        assert_eq!(pin.len(), PIN_LEN);
        assert!(all_digits(&pin) || all_lowercase(&pin));
    }
}
