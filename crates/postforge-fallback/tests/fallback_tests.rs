// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Totality and flag guarantees of the fallback bank.

use postforge_core::{Platform, PlatformTarget, Tone};
use postforge_fallback::{EMOJI_SET, generate_fallback};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn any_target() -> impl Strategy<Value = PlatformTarget> {
    let known: Vec<PlatformTarget> = Platform::iter().map(PlatformTarget::Known).collect();
    prop_oneof![
        proptest::sample::select(known),
        "[a-z]{2,12}".prop_map(|id| PlatformTarget::from(id.as_str())),
    ]
}

fn any_tone() -> impl Strategy<Value = Tone> {
    proptest::sample::select(Tone::iter().collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn fallback_is_never_empty(
        topic in "\\PC{0,60}",
        target in any_target(),
        tone in any_tone(),
        use_emojis in any::<bool>(),
        use_hashtags in any::<bool>(),
    ) {
        let text = generate_fallback(&topic, &target, tone, use_emojis, use_hashtags);
        prop_assert!(!text.trim().is_empty());
    }

    #[test]
    fn hashtags_off_means_no_hash(
        topic in "[#a-zA-Z ]{0,40}",
        target in any_target(),
        tone in any_tone(),
        use_emojis in any::<bool>(),
    ) {
        let text = generate_fallback(&topic, &target, tone, use_emojis, false);
        prop_assert!(!text.contains('#'));
    }

    #[test]
    fn emojis_off_means_no_bank_emoji(
        topic in "[a-zA-Z ✨🚀🔥]{0,40}",
        target in any_target(),
        tone in any_tone(),
        use_hashtags in any::<bool>(),
    ) {
        let text = generate_fallback(&topic, &target, tone, false, use_hashtags);
        prop_assert!(!text.chars().any(|c| EMOJI_SET.contains(&c)));
    }

    #[test]
    fn fallback_is_deterministic(
        topic in "[a-z ]{1,30}",
        target in any_target(),
        tone in any_tone(),
    ) {
        prop_assert_eq!(
            generate_fallback(&topic, &target, tone, true, true),
            generate_fallback(&topic, &target, tone, true, true)
        );
    }
}

#[test]
fn every_known_platform_and_an_unknown_one_produce_text() {
    let targets = Platform::iter()
        .map(PlatformTarget::Known)
        .chain(std::iter::once(PlatformTarget::from("friendster")));
    for target in targets {
        for tone in Tone::iter() {
            let text = generate_fallback("", &target, tone, true, true);
            assert!(!text.is_empty(), "{target} / {tone}");
        }
    }
}
