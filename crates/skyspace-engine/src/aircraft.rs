//! Aircraft: the mobile agents of the simulation.

use skyspace_core::{AircraftId, CellReader, GridError, Position};
use skyspace_planner::{Decision, Planner};

/// Lifecycle state of an aircraft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlightStatus {
    /// Still heading for its destination; claims one `Occupied` cell.
    EnRoute,
    /// Reached its destination. Terminal: never plans or moves again,
    /// and no longer claims a cell.
    Arrived,
}

/// One aircraft.
///
/// `position` is written only by the engine after a planner decision is
/// applied to the grid; everything else is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aircraft {
    id: AircraftId,
    priority_rank: u32,
    departure: Position,
    destination: Position,
    position: Position,
    status: FlightStatus,
    moves: u32,
    holds: u32,
}

impl Aircraft {
    /// Create an aircraft at its departure cell.
    ///
    /// An aircraft whose departure equals its destination starts arrived.
    pub fn new(
        id: AircraftId,
        priority_rank: u32,
        departure: Position,
        destination: Position,
    ) -> Self {
        let status = if departure == destination {
            FlightStatus::Arrived
        } else {
            FlightStatus::EnRoute
        };
        Self {
            id,
            priority_rank,
            departure,
            destination,
            position: departure,
            status,
            moves: 0,
            holds: 0,
        }
    }

    /// Identifier.
    pub fn id(&self) -> AircraftId {
        self.id
    }

    /// Commit-order key for the single-process scheduler; lower plans first.
    pub fn priority_rank(&self) -> u32 {
        self.priority_rank
    }

    /// Cell the aircraft departed from.
    pub fn departure(&self) -> Position {
        self.departure
    }

    /// Cell the aircraft is heading for.
    pub fn destination(&self) -> Position {
        self.destination
    }

    /// Current cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Lifecycle state.
    pub fn status(&self) -> FlightStatus {
        self.status
    }

    /// `true` once the aircraft has reached its destination.
    pub fn is_arrived(&self) -> bool {
        self.status == FlightStatus::Arrived
    }

    /// Number of cells moved so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Number of ticks spent holding.
    pub fn holds(&self) -> u32 {
        self.holds
    }

    /// Ask `planner` for this aircraft's next move against `grid`.
    ///
    /// Arrived aircraft always get [`Decision::Arrived`] without
    /// consulting the planner.
    pub fn plan(&self, planner: &dyn Planner, grid: &dyn CellReader) -> Result<Decision, GridError> {
        if self.is_arrived() {
            return Ok(Decision::Arrived);
        }
        planner.plan(self.position, self.destination, grid)
    }

    /// Record the outcome of an applied decision. Returns `true` if this
    /// step landed the aircraft.
    pub(crate) fn advance(&mut self, to: Position) -> bool {
        if to == self.position {
            self.holds += 1;
            return false;
        }
        self.position = to;
        self.moves += 1;
        if to == self.destination {
            self.status = FlightStatus::Arrived;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyspace_grid::Grid;
    use skyspace_planner::PriorityFallback;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn starts_at_departure() {
        let a = Aircraft::new(AircraftId(3), 1, p(0, 0), p(4, 4));
        assert_eq!(a.position(), p(0, 0));
        assert_eq!(a.status(), FlightStatus::EnRoute);
        assert_eq!(a.priority_rank(), 1);
    }

    #[test]
    fn departure_equal_to_destination_is_arrived() {
        let a = Aircraft::new(AircraftId(0), 0, p(2, 2), p(2, 2));
        assert!(a.is_arrived());
    }

    #[test]
    fn advance_counts_moves_holds_and_landing() {
        let mut a = Aircraft::new(AircraftId(0), 0, p(0, 0), p(1, 1));
        assert!(!a.advance(p(0, 0)));
        assert_eq!(a.holds(), 1);
        assert!(a.advance(p(1, 1)));
        assert!(a.is_arrived());
        assert_eq!(a.moves(), 1);
    }

    #[test]
    fn arrived_aircraft_never_consults_planner() {
        let grid = Grid::new(3, 3).unwrap();
        let a = Aircraft::new(AircraftId(0), 0, p(1, 1), p(1, 1));
        let d = a.plan(&PriorityFallback::default(), &grid).unwrap();
        assert_eq!(d, Decision::Arrived);
    }
}
