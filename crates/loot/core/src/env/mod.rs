//! Traits describing the collaborators the looting logic consults.
//!
//! The world, navigation surface, eligibility rules and settings are owned by
//! the host simulation. The [`Env`] aggregate bundles borrowed references to
//! them so a scan can reach everything it needs without coupling to concrete
//! implementations.
mod config;
mod eligibility;
mod navigation;
mod world;

pub use config::ConfigOracle;
pub use eligibility::EligibilityOracle;
pub use navigation::NavigationOracle;
pub use world::{ColliderBuffer, WorldQueryOracle};

/// Aggregates the oracles required by the scanner.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, W, N, E, C>
where
    W: WorldQueryOracle + ?Sized,
    N: NavigationOracle + ?Sized,
    E: EligibilityOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    world: &'a W,
    navigation: &'a N,
    eligibility: &'a E,
    config: &'a C,
}

pub type LootEnv<'a> = Env<
    'a,
    dyn WorldQueryOracle + 'a,
    dyn NavigationOracle + 'a,
    dyn EligibilityOracle + 'a,
    dyn ConfigOracle + 'a,
>;

impl<'a, W, N, E, C> Env<'a, W, N, E, C>
where
    W: WorldQueryOracle + ?Sized,
    N: NavigationOracle + ?Sized,
    E: EligibilityOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(world: &'a W, navigation: &'a N, eligibility: &'a E, config: &'a C) -> Self {
        Self {
            world,
            navigation,
            eligibility,
            config,
        }
    }

    pub fn world(&self) -> &'a W {
        self.world
    }

    pub fn navigation(&self) -> &'a N {
        self.navigation
    }

    pub fn eligibility(&self) -> &'a E {
        self.eligibility
    }

    pub fn config(&self) -> &'a C {
        self.config
    }
}

impl<'a, W, N, E, C> Env<'a, W, N, E, C>
where
    W: WorldQueryOracle + 'a,
    N: NavigationOracle + 'a,
    E: EligibilityOracle + 'a,
    C: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based `LootEnv`.
    ///
    /// Use this when hosts keep a single scan path regardless of which
    /// concrete oracles a session was built with.
    pub fn into_loot_env(self) -> LootEnv<'a> {
        let world: &'a dyn WorldQueryOracle = self.world;
        let navigation: &'a dyn NavigationOracle = self.navigation;
        let eligibility: &'a dyn EligibilityOracle = self.eligibility;
        let config: &'a dyn ConfigOracle = self.config;
        Env::new(world, navigation, eligibility, config)
    }
}
