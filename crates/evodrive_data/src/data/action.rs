use serde::{Deserialize, Serialize};

/// Concrete control applied to the vehicle for one tick.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ControlCommand {
    /// Forward (+1) / reverse (-1) drive input.
    pub throttle: f32,
    /// Left (-1) / right (+1) steering input.
    pub steer: f32,
}

impl ControlCommand {
    #[must_use]
    pub const fn new(throttle: f32, steer: f32) -> Self {
        Self { throttle, steer }
    }

    pub const IDLE: Self = Self::new(0.0, 0.0);
}

/// Maps discrete action indices emitted by the policy to control commands.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionTable {
    pub commands: Vec<ControlCommand>,
}

impl ActionTable {
    /// Forward, reverse, turn left, turn right, and the four diagonal combinations.
    #[must_use]
    pub fn eight_way() -> Self {
        Self {
            commands: vec![
                ControlCommand::new(1.0, 0.0),
                ControlCommand::new(-1.0, 0.0),
                ControlCommand::new(0.0, -1.0),
                ControlCommand::new(0.0, 1.0),
                ControlCommand::new(1.0, -1.0),
                ControlCommand::new(1.0, 1.0),
                ControlCommand::new(-1.0, -1.0),
                ControlCommand::new(-1.0, 1.0),
            ],
        }
    }

    /// Forward, reverse, turn left.
    #[must_use]
    pub fn three_way() -> Self {
        let mut table = Self::eight_way();
        table.commands.truncate(3);
        table
    }

    /// Picks the table matching a policy with `output_size` actions.
    #[must_use]
    pub fn for_outputs(output_size: usize) -> Self {
        if output_size <= 3 {
            Self::three_way()
        } else {
            Self::eight_way()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Unmapped indices fall back to [`ControlCommand::IDLE`].
    #[must_use]
    pub fn command(&self, action: usize) -> ControlCommand {
        self.commands
            .get(action)
            .copied()
            .unwrap_or(ControlCommand::IDLE)
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::eight_way()
    }
}
