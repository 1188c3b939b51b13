use crate::IdKind;
use serde::Serialize;

/// Bits of heuristic entropy below which a value is penalised.
pub const MIN_ENTROPY_BITS: u32 = 64;

/// How guessable a value of a kind is from its neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predictability {
    Low,
    Medium,
    High,
}

/// Strength of the randomness source behind a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CryptoStrength {
    Weak,
    Moderate,
    Strong,
}

/// Resistance of a kind to accidental collisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResistance {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAnalysis {
    /// `data_length * 4`. A nibble per character, not a measured quantity.
    pub entropy_bits: u32,
    pub predictability: Predictability,
    pub crypto_strength: CryptoStrength,
    pub collision_resistance: CollisionResistance,
    /// 0-100 rubric score.
    pub security_score: u32,
}

/// Static per-kind classification. It does not look at the value.
pub const fn security_profile(
    kind: IdKind,
) -> (Predictability, CryptoStrength, CollisionResistance) {
    use CollisionResistance as C;
    use CryptoStrength as S;
    use Predictability as P;

    match kind {
        IdKind::UuidV1 => (P::High, S::Weak, C::High),
        IdKind::UuidV4 => (P::Low, S::Strong, C::VeryHigh),
        IdKind::UuidV5 => (P::High, S::Moderate, C::High),
        IdKind::NanoId => (P::Low, S::Strong, C::High),
        IdKind::ShortId => (P::Medium, S::Moderate, C::Medium),
        IdKind::Ulid => (P::High, S::Moderate, C::High),
        IdKind::Custom => (P::Medium, S::Moderate, C::Low),
    }
}

/// Applies the fixed penalty rubric to a starting score of 100.
pub fn security_score(
    entropy_bits: u32,
    predictability: Predictability,
    crypto_strength: CryptoStrength,
    collision_resistance: CollisionResistance,
) -> u32 {
    let mut score: i32 = 100;

    score -= match predictability {
        Predictability::High => 30,
        Predictability::Medium => 15,
        Predictability::Low => 0,
    };
    score -= match crypto_strength {
        CryptoStrength::Weak => 40,
        CryptoStrength::Moderate => 20,
        CryptoStrength::Strong => 0,
    };
    score -= match collision_resistance {
        CollisionResistance::Low => 25,
        CollisionResistance::Medium => 10,
        CollisionResistance::High | CollisionResistance::VeryHigh => 0,
    };
    if entropy_bits < MIN_ENTROPY_BITS {
        score -= 20;
    }

    score.max(0) as u32
}

pub fn analyze_security(data_length: usize, kind: IdKind) -> SecurityAnalysis {
    let entropy_bits = u32::try_from(data_length.saturating_mul(4)).unwrap_or(u32::MAX);
    let (predictability, crypto_strength, collision_resistance) = security_profile(kind);

    SecurityAnalysis {
        entropy_bits,
        predictability,
        crypto_strength,
        collision_resistance,
        security_score: security_score(
            entropy_bits,
            predictability,
            crypto_strength,
            collision_resistance,
        ),
    }
}
