use std::sync::LazyLock;

use regex::Regex;

use super::QueryCard;
use crate::models::is_basic_land_name;
use crate::normalize::{has_phrase, normalize};

static CORE_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:core set|core|magic|m)\s?(20[0-9]{2}|[0-9]{2})$").expect("valid regex")
});

static DUEL_DECK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z .']+)\s+vs\.?\s+([a-z .']+)").expect("valid regex"));

fn any_phrase(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| has_phrase(text, p))
}

/// Promotional distribution channel named by the hints.
///
/// Variants are listed in dispatch priority: when several apply, the first
/// one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromoKind {
    Prerelease,
    PromoPack,
    Release,
    BuyABox,
    Bundle,
    FridayNightMagic,
    WorldChampionship,
    Judge,
    ArenaLeague,
    PlayerRewards,
    WpnGateway,
    Sdcc,
    MagazineInsert,
    ClashPack,
    HerosPath,
    Convention,
    MagicFest,
    DuelsOfThePlaneswalkers,
    DuelDecks,
    ChampsAndStates,
    PremiereShop,
    LandProgram,
}

impl PromoKind {
    pub const ALL: [PromoKind; 22] = [
        PromoKind::Prerelease,
        PromoKind::PromoPack,
        PromoKind::Release,
        PromoKind::BuyABox,
        PromoKind::Bundle,
        PromoKind::FridayNightMagic,
        PromoKind::WorldChampionship,
        PromoKind::Judge,
        PromoKind::ArenaLeague,
        PromoKind::PlayerRewards,
        PromoKind::WpnGateway,
        PromoKind::Sdcc,
        PromoKind::MagazineInsert,
        PromoKind::ClashPack,
        PromoKind::HerosPath,
        PromoKind::Convention,
        PromoKind::MagicFest,
        PromoKind::DuelsOfThePlaneswalkers,
        PromoKind::DuelDecks,
        PromoKind::ChampsAndStates,
        PromoKind::PremiereShop,
        PromoKind::LandProgram,
    ];

    /// Whether `query` belongs to this channel.
    pub fn applies_to(self, query: &QueryCard) -> bool {
        match self {
            PromoKind::Prerelease => query.is_prerelease(),
            PromoKind::PromoPack => query.is_promo_pack(),
            PromoKind::Release => query.is_release(),
            PromoKind::BuyABox => query.is_buy_a_box(),
            PromoKind::Bundle => query.is_bundle(),
            PromoKind::FridayNightMagic => query.is_fnm(),
            PromoKind::WorldChampionship => query.is_world_championship(),
            PromoKind::Judge => query.is_judge(),
            PromoKind::ArenaLeague => query.is_arena_league(),
            PromoKind::PlayerRewards => query.is_player_rewards(),
            PromoKind::WpnGateway => query.is_wpn_gateway(),
            PromoKind::Sdcc => query.is_sdcc(),
            PromoKind::MagazineInsert => query.is_magazine_insert(),
            PromoKind::ClashPack => query.is_clash_pack(),
            PromoKind::HerosPath => query.is_heros_path(),
            PromoKind::Convention => query.is_convention(),
            PromoKind::MagicFest => query.is_magic_fest(),
            PromoKind::DuelsOfThePlaneswalkers => query.is_duels_of_the_planeswalkers(),
            PromoKind::DuelDecks => query.is_duel_decks(),
            PromoKind::ChampsAndStates => query.is_champs_and_states(),
            PromoKind::PremiereShop => query.is_premiere_shop(),
            PromoKind::LandProgram => query.is_land_program(),
        }
    }
}

impl QueryCard {
    /// The highest-priority promotional channel the hints name, if any.
    pub fn promo_kind(&self) -> Option<PromoKind> {
        PromoKind::ALL.into_iter().find(|kind| kind.applies_to(self))
    }

    // -- Promotional channels ------------------------------------------------

    pub fn is_prerelease(&self) -> bool {
        any_phrase(&self.hints_text(), &["prerelease", "pre release"])
    }

    pub fn is_promo_pack(&self) -> bool {
        any_phrase(
            &self.hints_text(),
            &["promo pack", "promopack", "promo packs", "planeswalker stamp"],
        )
    }

    pub fn is_release(&self) -> bool {
        let text = self.hints_text();
        !self.is_prerelease() && any_phrase(&text, &["release", "launch", "launch party"])
    }

    pub fn is_buy_a_box(&self) -> bool {
        any_phrase(&self.hints_text(), &["buy a box", "buyabox", "bab"])
    }

    pub fn is_bundle(&self) -> bool {
        any_phrase(&self.hints_text(), &["bundle", "fat pack"])
    }

    pub fn is_fnm(&self) -> bool {
        any_phrase(&self.hints_text(), &["fnm", "friday night magic", "friday night"])
    }

    pub fn is_judge(&self) -> bool {
        any_phrase(&self.hints_text(), &["judge", "judge gift", "dci judge"])
    }

    pub fn is_arena_league(&self) -> bool {
        let text = self.hints_text();
        has_phrase(&text, "arena") && !any_phrase(&text, &["mtg arena", "arena code"])
    }

    pub fn is_player_rewards(&self) -> bool {
        any_phrase(
            &self.hints_text(),
            &["player rewards", "rewards", "textless", "mpr"],
        )
    }

    pub fn is_wpn_gateway(&self) -> bool {
        any_phrase(
            &self.hints_text(),
            &["wpn", "gateway", "wizards play network"],
        )
    }

    pub fn is_sdcc(&self) -> bool {
        any_phrase(
            &self.hints_text(),
            &["sdcc", "san diego comic con", "comic con"],
        )
    }

    pub fn is_magazine_insert(&self) -> bool {
        !self.is_sdcc()
            && any_phrase(
                &self.hints_text(),
                &[
                    "idw", "comic", "comics", "magazine", "book", "insert", "inserts", "duelist",
                    "harperprism", "media",
                ],
            )
    }

    pub fn is_clash_pack(&self) -> bool {
        any_phrase(&self.hints_text(), &["clash", "clash pack"])
    }

    pub fn is_heros_path(&self) -> bool {
        any_phrase(&self.hints_text(), &["heros path", "hero s path"])
    }

    pub fn is_convention(&self) -> bool {
        any_phrase(
            &self.hints_text(),
            &["convention", "gen con", "url convention", "dragon con"],
        )
    }

    pub fn is_world_championship(&self) -> bool {
        any_phrase(
            &self.hints_text(),
            &["world championship", "world championships", "worlds", "wcd"],
        )
    }

    pub fn is_magic_fest(&self) -> bool {
        any_phrase(&self.hints_text(), &["magicfest", "magic fest"])
    }

    pub fn is_duels_of_the_planeswalkers(&self) -> bool {
        any_phrase(
            &self.hints_text(),
            &["duels of the planeswalkers", "dotp", "duels"],
        )
    }

    pub fn is_duel_decks(&self) -> bool {
        any_phrase(&self.hints_text(), &["duel deck", "duel decks", "dd"])
    }

    pub fn is_champs_and_states(&self) -> bool {
        any_phrase(&self.hints_text(), &["champs", "states", "champs and states"])
    }

    pub fn is_premiere_shop(&self) -> bool {
        any_phrase(&self.hints_text(), &["premiere shop", "mps", "magic premiere shop"])
    }

    pub fn is_apac(&self) -> bool {
        any_phrase(&self.hints_text(), &["apac", "asia pacific", "pacific"])
    }

    pub fn is_euro(&self) -> bool {
        any_phrase(&self.hints_text(), &["euro", "european", "europe"])
    }

    /// A basic land from the Asia-Pacific or European land programs.
    pub fn is_land_program(&self) -> bool {
        self.is_basic_land() && (self.is_apac() || self.is_euro())
    }

    pub fn is_basic_land(&self) -> bool {
        is_basic_land_name(&self.name)
    }

    /// Anthology deck named in the hints ("Elves vs. Goblins" -> "elves vs goblins").
    pub fn duel_deck_name(&self) -> Option<String> {
        let text = format!("{} {}", self.edition, self.variation);
        let caps = DUEL_DECK_RE.captures(&text)?;
        let strip = |s: &str| {
            let s = normalize(s);
            s.trim_start_matches("duel decks anthology ")
                .trim_start_matches("duel decks ")
                .trim_start_matches("anthology ")
                .to_string()
        };
        let left = strip(caps.get(1)?.as_str());
        let right = normalize(caps.get(2)?.as_str());
        Some(format!("{left} vs {right}"))
    }

    /// Year of a core set named by the edition ("M2019", "Core 2020", "Magic 14").
    pub fn core_set_year(&self) -> Option<u32> {
        let text = self.edition_text();
        let caps = CORE_YEAR_RE.captures(&text)?;
        let year: u32 = caps.get(1)?.as_str().parse().ok()?;
        Some(if year < 100 { 2000 + year } else { year })
    }

    // -- Treatments ----------------------------------------------------------

    pub fn is_borderless(&self) -> bool {
        has_phrase(&self.variation_text(), "borderless")
    }

    pub fn is_extended_art(&self) -> bool {
        any_phrase(
            &self.variation_text(),
            &["extended art", "extendedart", "extended"],
        )
    }

    pub fn is_showcase(&self) -> bool {
        any_phrase(&self.variation_text(), &["showcase", "frame break"])
    }

    pub fn is_non_full_art(&self) -> bool {
        any_phrase(
            &self.variation_text(),
            &["non full art", "not full art", "non fullart", "nfa", "non full"],
        )
    }

    pub fn is_full_art(&self) -> bool {
        !self.is_non_full_art()
            && any_phrase(&self.variation_text(), &["full art", "fullart", "fa"])
    }

    /// Crossover printing sold under its alternate name.
    pub fn is_reskin(&self) -> bool {
        any_phrase(
            &self.variation_text(),
            &["reskin", "godzilla", "dracula", "flavor name", "godzilla series"],
        )
    }

    pub fn is_japanese(&self) -> bool {
        any_phrase(&self.variation_text(), &["japanese", "jp", "jpn", "ja"])
    }

    /// Arabian Nights light mana symbol variant.
    pub fn is_ark_light(&self) -> bool {
        has_phrase(&self.variation_text(), "light")
    }

    /// Arabian Nights dark mana symbol variant.
    pub fn is_ark_dark(&self) -> bool {
        has_phrase(&self.variation_text(), "dark")
    }

    pub fn is_misprint(&self) -> bool {
        any_phrase(
            &self.variation_text(),
            &["misprint", "variant", "alternate", "alt art"],
        )
    }
}
