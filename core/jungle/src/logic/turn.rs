//! 回合切換

use crate::component::Team;

impl Team {
    /// 回傳另一方陣營
    pub fn toggle(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}
