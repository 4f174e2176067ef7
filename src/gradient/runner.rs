//! Gradient ascent, descent and Newton's method.

use super::config::GradientConfig;
use crate::error::{check_quality, SearchError};
use crate::population::Incumbent;
use crate::problem::{Generator, Gradient, Objective, Quality, Termination};
use crate::random::{rng_from, DEFAULT_SEED};
use crate::result::SearchResult;

/// One update rule applied to the current point.
#[derive(Clone, Copy)]
enum Step {
    Ascent,
    Descent,
    Newton,
}

/// Executes the gradient procedures.
///
/// Every procedure stops on an ideal point, an exhausted budget, or a
/// gradient norm at or below `config.tolerance`.
pub struct GradientRunner;

impl GradientRunner {
    /// Gradient ascent: `x <- x + alpha * grad f(x)`, maximizing quality.
    ///
    /// # Examples
    ///
    /// ```
    /// use metaheur::gradient::{GradientConfig, GradientRunner};
    /// use metaheur::operators::vector;
    /// use metaheur::problem::{Gradient, Quality, SearchSpace, Termination, VectorSpace};
    /// use rand::Rng;
    ///
    /// // f(x) = -(x - 3)^2
    /// struct Peak;
    /// impl SearchSpace for Peak { type Candidate = Vec<f64>; }
    /// impl Quality for Peak {
    ///     fn quality(&self, x: &Vec<f64>) -> f64 { -(x[0] - 3.0).powi(2) }
    /// }
    /// impl Termination for Peak {}
    /// impl VectorSpace for Peak {
    ///     fn sum(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> { vector::add(a, b) }
    ///     fn dif(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> { vector::sub(a, b) }
    ///     fn mul(&self, k: f64, v: &Vec<f64>) -> Vec<f64> { vector::scale(k, v) }
    ///     fn random_scale<R: Rng>(&self, v: &Vec<f64>, bound: f64, rng: &mut R) -> Vec<f64> {
    ///         vector::random_scale(v, bound, rng)
    ///     }
    /// }
    /// impl Gradient for Peak {
    ///     fn gradient(&self, x: &Vec<f64>) -> Vec<f64> { vec![-2.0 * (x[0] - 3.0)] }
    ///     fn norm(&self, g: &Vec<f64>) -> f64 { vector::norm(g) }
    /// }
    ///
    /// let result = GradientRunner::ascent(&Peak, vec![0.0], &GradientConfig::default()).unwrap();
    /// assert!((result.best[0] - 3.0).abs() < 1e-6);
    /// ```
    pub fn ascent<P>(
        problem: &P,
        start: P::Candidate,
        config: &GradientConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Gradient + Quality + Termination,
    {
        follow(problem, start, Step::Ascent, Objective::Maximize, config)
    }

    /// Gradient descent: `x <- x - alpha * grad f(x)`, minimizing quality.
    pub fn descent<P>(
        problem: &P,
        start: P::Candidate,
        config: &GradientConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Gradient + Quality + Termination,
    {
        follow(problem, start, Step::Descent, Objective::Minimize, config)
    }

    /// Newton's method: `x <- x - alpha * H(x)^-1 grad f(x)` using
    /// [`Gradient::newton_step`].
    ///
    /// The update seeks a stationary point either way; `objective` only
    /// decides which visited point is reported as best.
    pub fn newton<P>(
        problem: &P,
        start: P::Candidate,
        objective: Objective,
        config: &GradientConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Gradient + Quality + Termination,
    {
        follow(problem, start, Step::Newton, objective, config)
    }

    /// Gradient ascent (`Maximize`) or descent (`Minimize`) with random
    /// restarts.
    ///
    /// Each restart follows the gradient until its norm reaches
    /// `config.tolerance` or `config.inner_steps` steps were taken, then
    /// the next restart begins at a random candidate. The first restart
    /// begins at `start`. One restart consumes one budget unit.
    pub fn with_restarts<P>(
        problem: &P,
        start: P::Candidate,
        objective: Objective,
        config: &GradientConfig,
    ) -> Result<SearchResult<P::Candidate>, SearchError>
    where
        P: Gradient + Quality + Termination + Generator,
    {
        config.validate()?;
        let mut rng = rng_from(config.seed, || DEFAULT_SEED);
        let step = match objective {
            Objective::Maximize => Step::Ascent,
            Objective::Minimize => Step::Descent,
        };

        let quality = check_quality(problem.quality(&start))?;
        let mut reached_ideal = problem.is_ideal(&start);
        let mut best = Incumbent::new(start.clone(), quality, objective);
        let mut x = start;

        log::debug!(
            "gradient {:?} with restarts: restarts={} inner_steps={} alpha={}",
            objective,
            config.max_iterations,
            config.inner_steps,
            config.alpha
        );

        let mut restarts = 0;
        while !reached_ideal && restarts < config.max_iterations {
            restarts += 1;
            let mut steps = 0;
            while steps < config.inner_steps {
                let g = problem.gradient(&x);
                if problem.norm(&g) <= config.tolerance {
                    break;
                }
                x = apply(problem, &x, &g, step, config.alpha);
                steps += 1;
            }
            let q = problem.quality(&x);
            log::debug!("restart {restarts}: {steps} steps, quality {q}");
            if best.offer(&x, q) {
                reached_ideal = problem.is_ideal(&x);
            }
            best.record();
            x = problem.random_candidate(&mut rng);
        }

        log::debug!(
            "gradient with restarts finished: restarts={restarts} best={}",
            best.quality()
        );
        Ok(best.into_result(restarts, reached_ideal))
    }
}

fn apply<P: Gradient>(problem: &P, x: &P::Candidate, g: &P::Candidate, step: Step, alpha: f64) -> P::Candidate {
    match step {
        Step::Ascent => problem.sum(x, &problem.mul(alpha, g)),
        Step::Descent => problem.dif(x, &problem.mul(alpha, g)),
        Step::Newton => problem.dif(x, &problem.mul(alpha, &problem.newton_step(x, g))),
    }
}

fn follow<P>(
    problem: &P,
    start: P::Candidate,
    step: Step,
    objective: Objective,
    config: &GradientConfig,
) -> Result<SearchResult<P::Candidate>, SearchError>
where
    P: Gradient + Quality + Termination,
{
    config.validate()?;
    let quality = check_quality(problem.quality(&start))?;
    let mut reached_ideal = problem.is_ideal(&start);
    let mut best = Incumbent::new(start.clone(), quality, objective);
    let mut x = start;

    let mut iterations = 0;
    while !reached_ideal && iterations < config.max_iterations {
        let g = problem.gradient(&x);
        if problem.norm(&g) <= config.tolerance {
            log::debug!("gradient converged after {iterations} steps");
            break;
        }
        iterations += 1;
        x = apply(problem, &x, &g, step, config.alpha);
        best.offer(&x, problem.quality(&x));
        reached_ideal = problem.is_ideal(&x);
        best.record();
    }

    log::debug!(
        "gradient finished: iterations={iterations} best={} ideal={reached_ideal}",
        best.quality()
    );
    Ok(best.into_result(iterations, reached_ideal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::vector::{add, norm, random_scale, scale, sub};
    use crate::problem::{SearchSpace, VectorSpace};
    use rand::Rng;

    macro_rules! real_line {
        ($t:ty) => {
            impl SearchSpace for $t {
                type Candidate = Vec<f64>;
            }
            impl VectorSpace for $t {
                fn sum(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
                    add(a, b)
                }
                fn dif(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
                    sub(a, b)
                }
                fn mul(&self, k: f64, v: &Vec<f64>) -> Vec<f64> {
                    scale(k, v)
                }
                fn random_scale<R: Rng>(&self, v: &Vec<f64>, bound: f64, rng: &mut R) -> Vec<f64> {
                    random_scale(v, bound, rng)
                }
            }
        };
    }

    // ---- f(x) = (x - 3)^2 ----

    struct Bowl;
    real_line!(Bowl);

    impl Quality for Bowl {
        fn quality(&self, x: &Vec<f64>) -> f64 {
            (x[0] - 3.0).powi(2)
        }
    }

    impl Termination for Bowl {}

    impl Gradient for Bowl {
        fn gradient(&self, x: &Vec<f64>) -> Vec<f64> {
            vec![2.0 * (x[0] - 3.0)]
        }
        fn norm(&self, g: &Vec<f64>) -> f64 {
            norm(g)
        }
        fn newton_step(&self, _x: &Vec<f64>, g: &Vec<f64>) -> Vec<f64> {
            // constant Hessian 2
            vec![g[0] / 2.0]
        }
    }

    // ---- f(x) = -(x^2 - 1)^2 + x / 2: local peak near -1, global near 1 ----

    struct TwoHills;
    real_line!(TwoHills);

    impl Quality for TwoHills {
        fn quality(&self, x: &Vec<f64>) -> f64 {
            -(x[0] * x[0] - 1.0).powi(2) + 0.5 * x[0]
        }
    }

    impl Termination for TwoHills {}

    impl Generator for TwoHills {
        fn random_candidate<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
            vec![rng.random_range(-2.0..2.0)]
        }
    }

    impl Gradient for TwoHills {
        fn gradient(&self, x: &Vec<f64>) -> Vec<f64> {
            vec![-4.0 * x[0] * (x[0] * x[0] - 1.0) + 0.5]
        }
        fn norm(&self, g: &Vec<f64>) -> f64 {
            norm(g)
        }
    }

    #[test]
    fn test_descent_finds_minimum() {
        let result = GradientRunner::descent(&Bowl, vec![-10.0], &GradientConfig::default()).unwrap();
        assert!((result.best[0] - 3.0).abs() < 1e-6, "best {:?}", result.best);
        assert!(result.iterations < 1000, "should converge before the budget");
        for w in result.history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_newton_single_step() {
        let config = GradientConfig::default().with_alpha(1.0);
        let result = GradientRunner::newton(&Bowl, vec![-10.0], Objective::Minimize, &config).unwrap();
        assert_eq!(result.best, vec![3.0]);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best_quality, 0.0);
    }

    #[test]
    fn test_ascent_stays_on_local_hill() {
        let config = GradientConfig::default().with_alpha(0.01).with_max_iterations(5000);
        let result = GradientRunner::ascent(&TwoHills, vec![-1.5], &config).unwrap();
        assert!(result.best[0] < 0.0, "best {:?}", result.best);
    }

    #[test]
    fn test_restarts_find_global_hill() {
        let config = GradientConfig::default()
            .with_alpha(0.01)
            .with_max_iterations(20)
            .with_inner_steps(2000)
            .with_tolerance(1e-9)
            .with_seed(5);
        let result =
            GradientRunner::with_restarts(&TwoHills, vec![-1.5], Objective::Maximize, &config).unwrap();
        assert!(result.best[0] > 0.9, "best {:?}", result.best);
        assert_eq!(result.iterations, 20);
        assert_eq!(result.history.len(), 21);
    }

    #[test]
    fn test_budget_bounds_steps() {
        let config = GradientConfig::default().with_alpha(1e-6).with_max_iterations(10);
        let result = GradientRunner::descent(&Bowl, vec![-10.0], &config).unwrap();
        assert_eq!(result.iterations, 10);
        assert_eq!(result.history.len(), 11);
    }

    #[test]
    fn test_stationary_start() {
        let result = GradientRunner::descent(&Bowl, vec![3.0], &GradientConfig::default()).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, vec![3.0]);
    }
}
