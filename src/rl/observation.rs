use crate::game::{CellType, Observation};

/// Number of planes produced by [`create_observation`]
pub const OBSERVATION_CHANNELS: usize = 4;

/// Create a 4-channel observation from a grid snapshot
///
/// Channels:
/// - 0: Snake head (1.0 at the head cell)
/// - 1: Snake body (1.0 at body cells, excluding the head)
/// - 2: Fruit (1.0 at the fruit cell)
/// - 3: Walls (1.0 at wall cells, including interior obstacles)
///
/// Returns a flat `Vec<f32>` laid out as `[channel, y, x]`, i.e. shape
/// `[4, height, width]`.
pub fn create_observation(observation: &Observation) -> Vec<f32> {
    let plane = observation.width() * observation.height();
    let mut data = vec![0.0; OBSERVATION_CHANNELS * plane];

    for (idx, cell) in observation.cells().iter().enumerate() {
        if let Some(channel) = channel_of(*cell) {
            data[channel * plane + idx] = 1.0;
        }
    }

    data
}

/// Shape of the tensor produced for `observation`
pub fn observation_shape(observation: &Observation) -> [usize; 3] {
    [
        OBSERVATION_CHANNELS,
        observation.height(),
        observation.width(),
    ]
}

fn channel_of(cell: CellType) -> Option<usize> {
    match cell {
        CellType::SnakeHead => Some(0),
        CellType::SnakeBody => Some(1),
        CellType::Fruit => Some(2),
        CellType::Wall => Some(3),
        CellType::Empty => None,
    }
}
