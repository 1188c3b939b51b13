use super::{
    code::{BASE62_ALPHABET, NANOID_LENGTH, SHORTID_LENGTH, URL_SAFE_ALPHABET, random_code},
    sortable::sortable_code,
    rfc4122::{resolve_namespace, uuid_v1, uuid_v4, uuid_v5},
};
use crate::{
    Error, GenerationSettings, IdKind, RandSource, Result, SystemClock, ThreadRandom, TimeSource,
};

/// The raw-generation rule behind one [`IdKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Random 128 bits, version 4.
    RandomUuid,
    /// Timestamp-led 128 bits, version 1.
    TimeUuid,
    /// SHA-1 of namespace and generated name, version 5.
    NameUuid,
    /// Fixed alphabet with a default length that `custom_length` overrides.
    Code {
        alphabet: &'static str,
        default_length: usize,
    },
    /// Crockford base32 timestamp followed by randomness.
    Sortable,
    /// Caller-supplied alphabet and length.
    Custom,
}

/// One row of the registry table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrategyEntry {
    pub kind: IdKind,
    pub strategy: Strategy,
}

impl StrategyEntry {
    const fn for_kind(kind: IdKind) -> Self {
        let strategy = match kind {
            IdKind::UuidV1 => Strategy::TimeUuid,
            IdKind::UuidV4 => Strategy::RandomUuid,
            IdKind::UuidV5 => Strategy::NameUuid,
            IdKind::NanoId => Strategy::Code {
                alphabet: URL_SAFE_ALPHABET,
                default_length: NANOID_LENGTH,
            },
            IdKind::ShortId => Strategy::Code {
                alphabet: BASE62_ALPHABET,
                default_length: SHORTID_LENGTH,
            },
            IdKind::Ulid => Strategy::Sortable,
            IdKind::Custom => Strategy::Custom,
        };
        Self { kind, strategy }
    }

    /// The fixed alphabet of a generic code kind.
    pub const fn alphabet(&self) -> Option<&'static str> {
        match self.strategy {
            Strategy::Code { alphabet, .. } => Some(alphabet),
            _ => None,
        }
    }
}

static TABLE: [StrategyEntry; IdKind::ALL.len()] = {
    let mut table = [StrategyEntry::for_kind(IdKind::UuidV4); IdKind::ALL.len()];
    let mut i = 0;
    while i < IdKind::ALL.len() {
        table[i] = StrategyEntry::for_kind(IdKind::ALL[i]);
        i += 1;
    }
    table
};

/// The registry row for `kind`, without needing a registry instance.
pub fn strategy_for(kind: IdKind) -> &'static StrategyEntry {
    &TABLE[kind.index()]
}

/// Immutable mapping from [`IdKind`] to its raw-generation rule.
///
/// The table is built at compile time; the registry only adds the time and
/// random sources the rules draw from. Both are pluggable so tests can pin
/// the output.
///
/// # Example
///
/// ```
/// use idforge::{GenerationSettings, IdKind, StrategyRegistry};
///
/// let registry: StrategyRegistry = StrategyRegistry::default();
/// let settings = GenerationSettings::new(IdKind::UuidV4, 1);
/// let raw = registry.generate_raw(IdKind::UuidV4, &settings).unwrap();
/// assert_eq!(raw.len(), 36);
/// ```
#[derive(Clone, Debug)]
pub struct StrategyRegistry<T = SystemClock, R = ThreadRandom> {
    time: T,
    rng: R,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new(SystemClock, ThreadRandom)
    }
}

impl<T, R> StrategyRegistry<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64> + RandSource<u128>,
{
    pub const fn new(time: T, rng: R) -> Self {
        Self { time, rng }
    }

    /// The clock the time-based rules read.
    pub const fn time(&self) -> &T {
        &self.time
    }

    /// The registry row for `kind`.
    pub fn entry(&self, kind: IdKind) -> &'static StrategyEntry {
        strategy_for(kind)
    }

    /// The registry row for a free-form tag. Unknown tags resolve to the
    /// `uuid_v4` row.
    pub fn lookup(&self, tag: &str) -> &'static StrategyEntry {
        self.entry(IdKind::from_tag(tag))
    }

    /// Produces one unformatted value for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] when the custom kind has no usable
    /// alphabet or length.
    pub fn generate_raw(&self, kind: IdKind, settings: &GenerationSettings) -> Result<String> {
        match self.entry(kind).strategy {
            Strategy::RandomUuid => Ok(uuid_v4::<R>(&self.rng)),
            Strategy::TimeUuid => Ok(uuid_v1::<T, R>(&self.time, &self.rng)),
            Strategy::NameUuid => {
                let namespace = resolve_namespace(settings.namespace.as_deref());
                Ok(uuid_v5::<R>(&namespace, &self.rng))
            }
            Strategy::Code {
                alphabet,
                default_length,
            } => {
                let alphabet: Vec<char> = alphabet.chars().collect();
                let length = settings.custom_length.unwrap_or(default_length);
                random_code::<R>(&self.rng, &alphabet, length)
            }
            Strategy::Sortable => Ok(sortable_code::<T, R>(&self.time, &self.rng)),
            Strategy::Custom => {
                let length = settings
                    .custom_length
                    .ok_or_else(|| Error::generation("custom kind requires a length"))?;
                random_code::<R>(&self.rng, &settings.custom_charset(), length)
            }
        }
    }
}
