use crate::consts;
use crate::util::Canvas;
use rand::Rng;
use ratatui::{
    layout::Position,
    style::{Color, Style},
};

/// The kinds of particle bursts emitted when food is eaten
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Burst {
    Food,
    Bonus,
}

impl Burst {
    fn count(self) -> u16 {
        match self {
            Burst::Food => 8,
            Burst::Bonus => 12,
        }
    }

    /// Range of initial speeds, in pixels per frame
    fn speed(self) -> std::ops::Range<f32> {
        match self {
            Burst::Food => 2.0..5.0,
            Burst::Bonus => 3.0..7.0,
        }
    }

    /// Lifetime in frames
    fn life(self) -> u16 {
        match self {
            Burst::Food => 30,
            Burst::Bonus => 45,
        }
    }
}

/// A single spark.  Positions & velocities are measured in board cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: u16,
    max_life: u16,
    color: Color,
}

impl Particle {
    fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vx *= consts::PARTICLE_DRAG;
        self.vy *= consts::PARTICLE_DRAG;
        self.life = self.life.saturating_sub(1);
    }

    /// Return the board cell the particle is currently in, if it is on the
    /// board at all
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn cell(&self) -> Option<Position> {
        let x = self.x.floor();
        let y = self.y.floor();
        let range = 0.0..f32::from(u16::MAX);
        (range.contains(&x) && range.contains(&y)).then(|| Position::new(x as u16, y as u16))
    }

    /// Glyph for the particle, fading as it ages
    fn symbol(&self) -> char {
        let [fresh, middle, faded] = consts::PARTICLE_SYMBOLS;
        let life = u32::from(self.life) * 3;
        let max_life = u32::from(self.max_life);
        if life > max_life * 2 {
            fresh
        } else if life > max_life {
            middle
        } else {
            faded
        }
    }
}

/// All live particles on the board
#[derive(Clone, Debug, Default, PartialEq)]
pub(super) struct Particles(Vec<Particle>);

impl Particles {
    /// Emit a burst of particles radiating evenly from the center of the cell
    /// at `origin`
    pub(super) fn burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: Position,
        kind: Burst,
        color: Color,
    ) {
        let x = f32::from(origin.x) + 0.5;
        let y = f32::from(origin.y) + 0.5;
        let step = 360.0 / f32::from(kind.count());
        for i in 0..kind.count() {
            let angle = (f32::from(i) * step).to_radians();
            let speed = rng.random_range(kind.speed()) / consts::CELL_PIXELS;
            self.0.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                life: kind.life(),
                max_life: kind.life(),
                color,
            });
        }
    }

    /// Advance every particle by one frame and discard the dead ones
    pub(super) fn update(&mut self) {
        for p in &mut self.0 {
            p.update();
        }
        self.0.retain(|p| p.life > 0);
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.0.len()
    }

    pub(super) fn draw(&self, canvas: &mut Canvas<'_>) {
        for p in &self.0 {
            if let Some(pos) = p.cell() {
                canvas.draw_cell(pos, p.symbol(), Style::new().fg(p.color));
            }
        }
    }
}
