//! Deterministic per-item attributes.
//!
//! Cards get an image and a fallback gradient picked by hashing the event id,
//! so the same event looks the same on every reload without storing the
//! choice anywhere. Editing a candidate list reshuffles every assignment.

/// Card images shipped with the frontend, under `images/`.
pub const EVENT_IMAGES: [&str; 20] = [
    "event1.png",
    "event2.png",
    "event3.png",
    "event4.png",
    "event5.png",
    "event6.png",
    "event7.png",
    "event8.png",
    "event9.png",
    "event10.png",
    "event11.png",
    "event12.png",
    "event13.png",
    "event14.png",
    "event15.png",
    "event16.png",
    "event17.png",
    "event18.png",
    "event19.png",
    "event20.png",
];

/// Shown behind a card image until (or instead of) the image loading.
pub const GRADIENT_FALLBACKS: [&str; 10] = [
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
    "linear-gradient(135deg, #30cfd0 0%, #330867 100%)",
    "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
    "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)",
    "linear-gradient(135deg, #ffecd2 0%, #fcb69f 100%)",
    "linear-gradient(135deg, #ff6e7f 0%, #bfe9ff 100%)",
];

/// Polynomial rolling hash (`h = h * 31 + unit`) over UTF-16 code units,
/// wrapped to a signed 32-bit integer, absolute value taken.
///
/// UTF-16 units keep the result identical to what browsers computed for ids
/// that already circulate in shared links.
pub fn hash_id(id: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in id.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Pick one candidate for `id`. `None` only for an empty candidate list.
pub fn pick<'a, T>(id: &str, candidates: &'a [T]) -> Option<&'a T> {
    if candidates.is_empty() {
        return None;
    }
    let idx = hash_id(id) as usize % candidates.len();
    candidates.get(idx)
}

/// Image path for an event card.
pub fn event_image(id: &str) -> String {
    let name = pick(id, &EVENT_IMAGES).copied().unwrap_or(EVENT_IMAGES[0]);
    format!("images/{name}")
}

/// Gradient painted behind the card image.
pub fn fallback_gradient(id: &str) -> &'static str {
    pick(id, &GRADIENT_FALLBACKS)
        .copied()
        .unwrap_or(GRADIENT_FALLBACKS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_values() {
        assert_eq!(hash_id(""), 0);
        assert_eq!(hash_id("A"), 65);
        assert_eq!(hash_id("B"), 66);
        assert_eq!(hash_id("abc"), 96354);
    }

    #[test]
    fn test_hash_wraps_and_takes_abs() {
        // Long ids overflow 32 bits; the result must still be the folded abs.
        let id = "656f1a2b3c4d5e6f70819203";
        let mut expected: i64 = 0;
        for unit in id.encode_utf16() {
            expected = ((expected * 31 + i64::from(unit)) as i32) as i64;
        }
        assert_eq!(hash_id(id), (expected as i32).unsigned_abs());
    }

    #[test]
    fn test_hash_uses_utf16_units() {
        // 'ế' is a single BMP unit (U+1EBF)
        assert_eq!(hash_id("ế"), 0x1EBF);
    }

    #[test]
    fn test_pick_fixed_indices() {
        assert_eq!(pick("A", &EVENT_IMAGES), Some(&"event6.png"));
        assert_eq!(pick("B", &EVENT_IMAGES), Some(&"event7.png"));
        assert_eq!(pick("abc", &EVENT_IMAGES), Some(&"event15.png"));
    }

    #[test]
    fn test_pick_is_deterministic() {
        for id in ["A", "B", "656f1a2b3c4d5e6f70819203", "Trận Bạch Đằng"] {
            let first = pick(id, &GRADIENT_FALLBACKS);
            for _ in 0..5 {
                assert_eq!(pick(id, &GRADIENT_FALLBACKS), first);
            }
        }
    }

    #[test]
    fn test_pick_empty_list() {
        let empty: [&str; 0] = [];
        assert_eq!(pick("A", &empty), None);
    }

    #[test]
    fn test_event_image_path() {
        assert_eq!(event_image("A"), "images/event6.png");
        assert_eq!(fallback_gradient("A"), GRADIENT_FALLBACKS[5]);
    }
}
