use once_cell::sync::OnceCell;

/// A value computed on first access and reused afterwards.
///
/// ```
/// use tessera_memo::Cached;
///
/// struct Circle {
///     radius: f64,
///     area:   Cached<f64>,
/// }
///
/// impl Circle {
///     fn area(&self) -> f64 {
///         *self.area.get_or_init(|| std::f64::consts::PI * self.radius * self.radius)
///     }
/// }
///
/// let circle = Circle { radius: 10.0, area: Cached::new() };
/// assert!(circle.area.get().is_none());
/// assert_eq!(circle.area(), circle.area());
/// assert!(circle.area.get().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cached<T> {
    cell: OnceCell<T>,
}

impl<T> Cached<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T { self.cell.get_or_init(init) }

    pub fn get(&self) -> Option<&T> { self.cell.get() }

    pub fn is_computed(&self) -> bool { self.cell.get().is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_init_runs_once() {
        let cached = Cached::new();
        let runs = Cell::new(0);

        for _ in 0..3 {
            let value = cached.get_or_init(|| {
                runs.set(runs.get() + 1);
                42
            });
            assert_eq!(*value, 42);
        }

        assert_eq!(runs.get(), 1);
        assert!(cached.is_computed());
    }

    #[test]
    fn test_empty_until_accessed() {
        let cached: Cached<String> = Cached::default();

        assert!(!cached.is_computed());
        assert_eq!(cached.get(), None);
    }
}
