use alloy::primitives::{B256, U256};
use std::fmt;

/// A set of role ids (0..=255) packed into a single 256-bit word.
///
/// Bit `i` set means role `i` is a member. Membership tests and the
/// "any overlapping role" question used by `canCall` are single word
/// operations, matching the on-chain `bytes32` layout.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(U256);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(U256::ZERO);

    pub fn contains(&self, role: u8) -> bool {
        self.0.bit(role as usize)
    }

    /// Returns a copy with `role` set or cleared.
    pub fn with(self, role: u8, enabled: bool) -> Self {
        let mut word = self.0;
        word.set_bit(role as usize, enabled);
        Self(word)
    }

    pub fn intersects(&self, other: &RoleSet) -> bool {
        !(self.0 & other.0).is_zero()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_zero()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |role| self.contains(*role))
    }

    pub fn to_b256(&self) -> B256 {
        B256::from(self.0.to_be_bytes::<32>())
    }

    pub fn from_b256(bytes: B256) -> Self {
        Self(U256::from_be_bytes::<32>(bytes.0))
    }
}

impl FromIterator<u8> for RoleSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        iter.into_iter()
            .fold(RoleSet::EMPTY, |set, role| set.with(role, true))
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
