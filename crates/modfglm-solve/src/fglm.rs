//! The FGLM driver.
//!
//! One run goes through the stages in order:
//!
//! 1. Krylov sequence of the multiplication matrix from a random probe
//! 2. Minimal polynomial of the power sums, and its radical when needed
//! 3. Coordinates: Hankel inversion in shape position, rational
//!    reconstruction (and optionally the radical check) otherwise
//! 4. Back-substitution of the linear variables
//!
//! An [`FglmContext`] keeps the buffers of a run alive so that the same
//! system can be replayed at other primes with [`FglmContext::apply_trace`].

use std::time::Instant;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use modfglm_field::PrimeField;
use modfglm_linalg::{LinearOperator, MatrixError};
use modfglm_poly::algorithms::gcd::poly_rem;
use modfglm_poly::BmsState;

use crate::config::FglmConfig;
use crate::error::FglmError;
use crate::hankel::invert_hankel;
use crate::layout::SystemLayout;
use crate::linear::LinearVariableEliminator;
use crate::minpoly::elimination_polynomial;
use crate::param::Parametrization;
use crate::radical::{reconstruct_coordinates, RadicalCheck};
use crate::sequence::{SequenceBuffers, SequenceGenerator};

/// A parametrization together with the verdict of the radical check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FglmOutcome {
    /// The parametrization.
    pub param: Parametrization,
    /// How far the parametrization can be trusted.
    pub check: RadicalCheck,
}

impl FglmOutcome {
    /// Numeric status: `nvars` when every coordinate is trusted, otherwise
    /// one more than the number of coordinates verified before the failure.
    #[must_use]
    pub fn status_code(&self) -> usize {
        match self.check {
            RadicalCheck::Partial { verified, .. } => verified + 1,
            _ => self.param.nvars(),
        }
    }

    /// Returns the parametrization if no coordinate failed the check.
    ///
    /// # Errors
    ///
    /// Returns [`FglmError::UnverifiedRadicalParametrization`] after a failed
    /// check.
    pub fn into_verified(self) -> Result<Parametrization, FglmError> {
        match self.check {
            RadicalCheck::Partial { verified, total } => {
                Err(FglmError::UnverifiedRadicalParametrization { verified, total })
            }
            _ => Ok(self.param),
        }
    }
}

/// Reusable state of FGLM runs over one system.
#[derive(Clone, Debug)]
pub struct FglmContext {
    field: PrimeField,
    config: FglmConfig,
    buffers: SequenceBuffers,
    bms: BmsState,
    /// Degree of the elimination polynomial of the last learning run.
    degree: Option<usize>,
}

impl FglmContext {
    /// Creates a context over `GF(prime)`.
    ///
    /// # Errors
    ///
    /// Fails when `prime` is not a prime below [`modfglm_field::MAX_PRIME`].
    pub fn new(prime: u64, config: FglmConfig) -> Result<Self, FglmError> {
        let field = PrimeField::new(prime)?;
        Ok(Self {
            field,
            config,
            buffers: SequenceBuffers::new(),
            bms: BmsState::new(field),
            degree: None,
        })
    }

    /// The current field.
    #[must_use]
    pub fn field(&self) -> PrimeField {
        self.field
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &FglmConfig {
        &self.config
    }

    /// Degree of the elimination polynomial found by the last
    /// [`FglmContext::compute`].
    #[must_use]
    pub fn learned_degree(&self) -> Option<usize> {
        self.degree
    }

    /// The buffers of the last run.
    #[must_use]
    pub fn buffers(&self) -> &SequenceBuffers {
        &self.buffers
    }

    /// Moves the context to another prime, keeping the buffers.
    pub fn set_field(&mut self, field: PrimeField) {
        self.field = field;
        self.bms.set_field(field);
    }

    /// Computes a parametrization from a random probe vector.
    ///
    /// The degree of the elimination polynomial is recorded for later
    /// trace runs.
    ///
    /// # Errors
    ///
    /// See [`FglmContext::compute_from_probe`].
    pub fn compute<O, R>(
        &mut self,
        op: &O,
        layout: &SystemLayout,
        rng: &mut R,
    ) -> Result<FglmOutcome, FglmError>
    where
        O: LinearOperator + ?Sized,
        R: Rng + ?Sized,
    {
        let probe = self.random_probe(op.dimension(), rng);
        self.run(op, layout, &probe, rng, None)
    }

    /// Computes a parametrization from the given probe vector.
    ///
    /// `rng` only drives the radical check.
    ///
    /// # Errors
    ///
    /// Fails when the operator or the layout is malformed, when the Hankel
    /// matrix cannot be inverted, or when the reconstruction table is not
    /// invertible.
    pub fn compute_from_probe<O, R>(
        &mut self,
        op: &O,
        layout: &SystemLayout,
        probe: &[u32],
        rng: &mut R,
    ) -> Result<FglmOutcome, FglmError>
    where
        O: LinearOperator + ?Sized,
        R: Rng + ?Sized,
    {
        self.run(op, layout, probe, rng, None)
    }

    /// Replays the computation at another prime.
    ///
    /// `op` must be the multiplication matrix of the same system reduced
    /// modulo `prime`. The radical check is skipped. Without a previous
    /// [`FglmContext::compute`] this behaves like one.
    ///
    /// # Errors
    ///
    /// Returns [`FglmError::TraceDegreeMismatch`] when the elimination
    /// polynomial does not have the learned degree, and the errors of
    /// [`FglmContext::compute_from_probe`] otherwise.
    pub fn apply_trace<O, R>(
        &mut self,
        op: &O,
        prime: u64,
        layout: &SystemLayout,
        rng: &mut R,
    ) -> Result<FglmOutcome, FglmError>
    where
        O: LinearOperator + ?Sized,
        R: Rng + ?Sized,
    {
        self.set_field(PrimeField::new(prime)?);
        let probe = self.random_probe(op.dimension(), rng);
        let target = self.degree;
        self.run(op, layout, &probe, rng, target)
    }

    fn random_probe<R: Rng + ?Sized>(&self, dim: usize, rng: &mut R) -> Vec<u32> {
        (0..dim).map(|_| self.field.random(rng)).collect()
    }

    fn run<O, R>(
        &mut self,
        op: &O,
        layout: &SystemLayout,
        probe: &[u32],
        rng: &mut R,
        target: Option<usize>,
    ) -> Result<FglmOutcome, FglmError>
    where
        O: LinearOperator + ?Sized,
        R: Rng + ?Sized,
    {
        let field = self.field;
        let dim = op.dimension();
        op.check_field(field)?;
        layout.check_dimension(dim)?;
        if probe.len() != dim {
            return Err(MatrixError::LengthMismatch {
                what: "probe",
                expected: dim,
                found: probe.len(),
            }
            .into());
        }

        let tracked = layout.tracked();
        let verify = self.config.verify_radical && target.is_none();
        info!(
            "FGLM over {field:?}: dimension {dim}, {} variables, {} linear",
            layout.nvars(),
            layout.nlins()
        );

        let start = Instant::now();
        SequenceGenerator::new(op, field, &tracked).generate(probe, &mut self.buffers, verify);
        debug!("sequence generated in {:.2?}", start.elapsed());

        let sequence = self.buffers.sequence();
        let elim = elimination_polynomial(&mut self.bms, &sequence, dim, layout);
        let degree = elim.degree();
        if let Some(expected) = target {
            if degree != expected {
                return Err(FglmError::TraceDegreeMismatch {
                    expected,
                    found: degree,
                });
            }
        }

        let mut param = Parametrization::new(field, layout.nvars());
        param.set_elim(elim.elim.clone());

        let check = if elim.shape_position {
            if !tracked.is_empty() {
                let inverse = invert_hankel(&mut self.bms, &sequence, dim)?;
                let terms = self.buffers.terms();
                for tc in &tracked {
                    let x = inverse.solve_stream(&terms.column(tc.column, dim + 1));
                    param.set_coord(tc.coord, poly_rem(&x, &elim.elim));
                }
            }
            RadicalCheck::ShapePosition
        } else {
            reconstruct_coordinates(
                &mut param,
                &self.buffers,
                &tracked,
                &elim.minpoly,
                verify.then_some(rng),
            )?
        };

        LinearVariableEliminator::new(layout).apply(&mut param);

        if target.is_none() {
            self.degree = Some(degree);
        }
        info!(
            "parametrization with elimination polynomial of degree {degree} in {:.2?}",
            start.elapsed()
        );
        Ok(FglmOutcome { param, check })
    }
}

/// Computes the parametrization of the system whose multiplication matrix
/// by `t` is `op`, over `GF(prime)`.
///
/// The probe vector and the verification shifts are drawn from a
/// `ChaCha8Rng` seeded with `config.seed`, so the result is reproducible.
///
/// # Errors
///
/// Returns [`FglmError::PrimeTooLarge`] for primes at or above
/// [`modfglm_field::MAX_PRIME`], and the errors of
/// [`FglmContext::compute_from_probe`].
pub fn fglm_compute<O: LinearOperator + ?Sized>(
    op: &O,
    prime: u64,
    layout: &SystemLayout,
    config: &FglmConfig,
) -> Result<FglmOutcome, FglmError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut context = FglmContext::new(prime, config.clone())?;
    context.compute(op, layout, &mut rng)
}
