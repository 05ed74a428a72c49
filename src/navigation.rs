//! Navigation and filter state for one browsing session.
//!
//! The state only computes *targets*; the current id moves when a load of
//! that target succeeds (see `Pokedex`), so a failed load leaves it as-is.

use crate::api::{fetch_type, PokeApi};
use crate::errors::{FilterError, FilterResult};
use crate::ids::{clamp_id, clamp_id_input, id_from_resource_url, in_range, MAX_ID};
use schema::PokemonType;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Maximum number of digits the number pad buffers.
pub const DIGIT_BUFFER_CAPACITY: usize = 4;

/// A key on the number pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumPadKey {
    Digit(u8),
    Clear,
    Enter,
}

impl FromStr for NumPadKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "clear" => Ok(NumPadKey::Clear),
            "enter" | "ok" => Ok(NumPadKey::Enter),
            other => match other.parse::<u8>() {
                Ok(digit) if digit <= 9 && other.len() == 1 => Ok(NumPadKey::Digit(digit)),
                _ => Err(format!("'{}' is not a number pad key", s)),
            },
        }
    }
}

/// Digits typed on the number pad but not yet committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: String,
}

impl DigitBuffer {
    /// Appends a digit. Returns `false` when the buffer is full or the value
    /// is not a single digit.
    pub fn push(&mut self, digit: u8) -> bool {
        if digit > 9 || self.digits.len() >= DIGIT_BUFFER_CAPACITY {
            return false;
        }
        self.digits.push(char::from(b'0' + digit));
        true
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The jump target for the buffered digits, or `None` if nothing was
    /// typed. The buffer itself is emptied by the load that follows.
    pub fn commit(&self) -> Option<u16> {
        if self.digits.is_empty() {
            None
        } else {
            Some(clamp_id_input(&self.digits))
        }
    }

    /// Right-aligned three-character rendering for the pad's display.
    pub fn display(&self) -> String {
        format!("{:>3}", self.digits)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterState {
    #[default]
    Unfiltered,
    Filtered {
        kind: PokemonType,
        /// Strictly ascending, never empty, all within `[1, MAX_ID]`.
        ids: Vec<u16>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_id: u16,
    filter: FilterState,
    pending_input: DigitBuffer,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl NavigationState {
    pub fn new(start_id: u16) -> Self {
        Self {
            current_id: clamp_id(i64::from(start_id)),
            filter: FilterState::Unfiltered,
            pending_input: DigitBuffer::default(),
        }
    }

    pub fn current_id(&self) -> u16 {
        self.current_id
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn active_filter(&self) -> Option<PokemonType> {
        match &self.filter {
            FilterState::Unfiltered => None,
            FilterState::Filtered { kind, .. } => Some(*kind),
        }
    }

    pub fn filtered_ids(&self) -> &[u16] {
        match &self.filter {
            FilterState::Unfiltered => &[],
            FilterState::Filtered { ids, .. } => ids.as_slice(),
        }
    }

    pub fn is_filtering(&self) -> bool {
        matches!(self.filter, FilterState::Filtered { .. })
    }

    pub fn pending_input(&self) -> &DigitBuffer {
        &self.pending_input
    }

    /// Records the id of a successfully loaded entity.
    pub fn set_current(&mut self, id: u16) {
        self.current_id = clamp_id(i64::from(id));
    }

    /// Empties the number pad buffer; done at the start of every load.
    pub fn reset_input(&mut self) {
        self.pending_input.clear();
    }

    /// Target of a relative move.
    ///
    /// Unfiltered, the id wraps circularly within `[1, MAX_ID]` for any
    /// `delta`. Filtered, only the sign of `delta` matters: the target is the
    /// neighbouring filtered id, wrapping at both ends. If the current id is
    /// not in the filtered set (after a direct jump), a forward step lands on
    /// the first filtered id and a backward step on the last. A zero delta
    /// stays put in both states.
    pub fn step(&self, delta: i64) -> u16 {
        if delta == 0 {
            return self.current_id;
        }

        let ids = self.filtered_ids();
        if ids.is_empty() {
            let max = i64::from(MAX_ID);
            let offset = delta.rem_euclid(max);
            let zero_based = (i64::from(self.current_id) - 1 + offset).rem_euclid(max);
            return (zero_based + 1) as u16;
        }

        let len = ids.len() as i64;
        let direction = delta.signum();
        let next_index = match ids.iter().position(|&id| id == self.current_id) {
            Some(index) => (index as i64 + direction).rem_euclid(len),
            None if direction > 0 => 0,
            None => len - 1,
        };
        debug!(from = self.current_id, delta, next_index, "filtered step");
        ids[next_index as usize]
    }

    /// Target of an absolute move. Filter membership is not checked: a
    /// direct entry may leave the filtered set without clearing the filter.
    pub fn jump_to(&self, raw: i64) -> u16 {
        clamp_id(raw)
    }

    /// Handles one number pad key. Returns a jump target on `Enter` with a
    /// non-empty buffer.
    pub fn press_key(&mut self, key: NumPadKey) -> Option<u16> {
        match key {
            NumPadKey::Digit(digit) => {
                self.pending_input.push(digit);
                None
            }
            NumPadKey::Clear => {
                self.pending_input.clear();
                None
            }
            NumPadKey::Enter => self.pending_input.commit(),
        }
    }

    /// Queries the service for every entity of `kind` and switches to
    /// filtered navigation. Returns the first filtered id, which the caller
    /// is expected to load.
    ///
    /// A fetch failure leaves the state untouched. An empty result resets
    /// the filter and reports [`FilterError::NoMatches`].
    pub async fn apply_filter<A: PokeApi + ?Sized>(
        &mut self,
        api: &A,
        kind: PokemonType,
    ) -> FilterResult<u16> {
        let listing = fetch_type(api, kind).await?;

        let ids = listing.pokemon.iter().filter_map(|entry| {
            let id = id_from_resource_url(&entry.pokemon.url);
            if id.is_none() {
                warn!(url = %entry.pokemon.url, "skipping malformed resource url");
            }
            id
        });
        self.set_filter(kind, ids)
    }

    /// Installs a filter from raw ids: drops out-of-range ids, sorts and
    /// deduplicates the rest.
    pub fn set_filter(
        &mut self,
        kind: PokemonType,
        ids: impl IntoIterator<Item = u32>,
    ) -> FilterResult<u16> {
        let mut ids: Vec<u16> = ids
            .into_iter()
            .filter(|&id| in_range(id))
            .map(|id| id as u16)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let Some(&first) = ids.first() else {
            self.clear_filter();
            return Err(FilterError::NoMatches(kind));
        };

        info!(%kind, matches = ids.len(), "filter applied");
        self.filter = FilterState::Filtered { kind, ids };
        Ok(first)
    }

    /// Back to unfiltered navigation; the current id is kept.
    pub fn clear_filter(&mut self) -> u16 {
        if self.is_filtering() {
            info!("filter cleared");
        }
        self.filter = FilterState::Unfiltered;
        self.current_id
    }
}

/// Parses a user-supplied type name.
pub fn parse_type(name: &str) -> FilterResult<PokemonType> {
    name.trim()
        .parse()
        .map_err(|_| FilterError::UnknownType(name.trim().to_string()))
}
