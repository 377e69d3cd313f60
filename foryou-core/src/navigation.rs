use std::collections::HashSet;

use tracing::debug;

use crate::error::{ForYouError, ForYouResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Destination {
    pub route: &'static str,
    pub destination: &'static str,
}

pub const FOR_YOU: Destination = Destination {
    route: "for_you_route",
    destination: "for_you_destination",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopLevelDestination {
    pub route: &'static str,
    pub label: &'static str,
    pub selected_icon: &'static str,
    pub unselected_icon: &'static str,
}

pub fn top_level_destinations() -> &'static [TopLevelDestination] {
    const DESTINATIONS: &[TopLevelDestination] = &[TopLevelDestination {
        route: FOR_YOU.route,
        label: "For you",
        selected_icon: "🏠",
        unselected_icon: "⌂",
    }];
    DESTINATIONS
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    destinations: Vec<Destination>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table every screen of the app is registered in.
    pub fn app() -> ForYouResult<Self> {
        let mut table = Self::new();
        table.register(FOR_YOU)?;
        Ok(table)
    }

    pub fn register(&mut self, destination: Destination) -> ForYouResult<()> {
        if self.contains(destination.route) {
            return Err(ForYouError::DuplicateRoute(destination.route.to_string()));
        }
        self.destinations.push(destination);
        Ok(())
    }

    pub fn contains(&self, route: &str) -> bool {
        self.destinations.iter().any(|d| d.route == route)
    }

    pub fn get(&self, route: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.route == route)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }
}

/// Back stack for switching between top-level destinations.
///
/// Navigating pops everything above the start destination (remembering the
/// popped route so its state can be restored later) and never stacks the
/// same route twice on top.
#[derive(Debug, Clone)]
pub struct TopLevelNavigator {
    routes: RouteTable,
    start: &'static str,
    back_stack: Vec<&'static str>,
    saved: HashSet<&'static str>,
}

impl TopLevelNavigator {
    pub fn new(routes: RouteTable, start: &str) -> ForYouResult<Self> {
        let start = routes
            .get(start)
            .ok_or_else(|| ForYouError::UnknownRoute(start.to_string()))?
            .route;
        Ok(Self {
            routes,
            start,
            back_stack: vec![start],
            saved: HashSet::new(),
        })
    }

    pub fn current(&self) -> &'static str {
        self.back_stack.last().copied().unwrap_or(self.start)
    }

    pub fn back_stack(&self) -> &[&'static str] {
        &self.back_stack
    }

    /// Returns whether the target's saved state was restored.
    pub fn navigate_to(&mut self, route: &str) -> ForYouResult<bool> {
        let target = self
            .routes
            .get(route)
            .ok_or_else(|| ForYouError::UnknownRoute(route.to_string()))?
            .route;
        if self.current() == target {
            debug!(route = target, "already on top, single-top navigation skipped");
            return Ok(false);
        }
        while self.back_stack.len() > 1 {
            if let Some(popped) = self.back_stack.pop() {
                self.saved.insert(popped);
            }
        }
        if target == self.start {
            return Ok(false);
        }
        self.back_stack.push(target);
        Ok(self.saved.remove(target))
    }

    pub fn is_selected(&self, destination: &TopLevelDestination) -> bool {
        self.current() == destination.route
    }
}
