// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod messages;
pub mod processors;

pub use factory::LocalBehaviourFactory;
pub use messages::*;
pub use processors::*;
