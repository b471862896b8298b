/// Health collaborator. The machine reads the fraction and routes heals
/// through it; it never stores or mutates a health value itself.
pub trait Health {
    /// Current health as a fraction of maximum, in `[0, 1]`.
    fn health_fraction(&self) -> f32;

    fn take_damage(&mut self, amount: f32);

    fn heal(&mut self, amount: f32);

    fn is_dead(&self) -> bool;

    /// Forces death regardless of remaining health.
    fn kill(&mut self);
}
