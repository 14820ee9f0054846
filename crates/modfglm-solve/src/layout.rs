//! Which variables are linear, and where the others live in the basis.
//!
//! Variables are `x_0, ..., x_{n-1}` and the last one, `t = x_{n-1}`, is
//! the separating variable the parametrization is written in. The quotient
//! basis starts with `1` and `t`; the next `k` basis monomials are the
//! non-linear coordinates `x_i` in descending order of `i`. Linear
//! coordinates are given by equations
//!
//!   x_i = c_t t + c_0 - sum_{j > i} c_j x_j
//!
//! stored as rows of `n + 1` residues: the coefficients of `x_0..x_{n-2}`
//! (with `c_i = 1`), then `c_t`, then `c_0`. When every variable is linear
//! the last row gives the elimination polynomial `t + c_0`.

use crate::error::FglmError;

/// A non-linear coordinate read off the Krylov vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedCoordinate {
    /// Variable index of the coordinate.
    pub coord: usize,
    /// Column of the sequence table holding its stream (column 0 is `t^i`).
    pub column: usize,
    /// Basis index of the monomial `x_coord`.
    pub basis_index: usize,
    /// Basis index of `x_coord^2`, when it is a basis monomial.
    pub square_index: Option<usize>,
}

/// Variable structure of the system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemLayout {
    nvars: usize,
    nlins: usize,
    linvars: Vec<bool>,
    lineqs: Vec<u32>,
    squvars: Vec<Option<usize>>,
}

impl SystemLayout {
    /// Creates a layout.
    ///
    /// - `linvars[i]` tells whether `x_i` is linear, for `i < nvars - 1`
    /// - `lineqs` holds `nlins` rows of `nvars + 1` entries, one per linear
    ///   variable in increasing order, plus a last row for `t` when every
    ///   variable is linear
    /// - `squvars[i]` is the basis index of `x_i^2`, if any
    ///
    /// # Errors
    ///
    /// Returns [`FglmError::InvalidLayout`] when the lengths disagree, when
    /// `nlins` does not match the linear variables, or when an equation
    /// does not have coefficient 1 on its own variable.
    pub fn new(
        nvars: usize,
        nlins: usize,
        linvars: Vec<bool>,
        lineqs: Vec<u32>,
        squvars: Vec<Option<usize>>,
    ) -> Result<Self, FglmError> {
        if nvars == 0 {
            return Err(invalid("at least one variable is required"));
        }
        if linvars.len() != nvars - 1 || squvars.len() != nvars - 1 {
            return Err(invalid(format!(
                "linvars and squvars need {} entries, got {} and {}",
                nvars - 1,
                linvars.len(),
                squvars.len()
            )));
        }
        if lineqs.len() != nlins * (nvars + 1) {
            return Err(invalid(format!(
                "lineqs has {} entries, expected {}",
                lineqs.len(),
                nlins * (nvars + 1)
            )));
        }

        let count = linvars.iter().filter(|&&l| l).count();
        let all_linear = nlins == nvars && count == nvars - 1;
        if nlins != count && !all_linear {
            return Err(invalid(format!(
                "{nlins} linear equations for {count} linear variables"
            )));
        }

        let layout = Self {
            nvars,
            nlins,
            linvars,
            lineqs,
            squvars,
        };
        let mut owners: Vec<usize> = layout.linear_coordinates().collect();
        if all_linear {
            owners.push(nvars - 1);
        }
        for (r, &k) in owners.iter().enumerate() {
            if layout.lineq_row(r)[k] != 1 {
                return Err(invalid(format!(
                    "equation {r} does not have coefficient 1 on x_{k}"
                )));
            }
        }
        Ok(layout)
    }

    /// A layout with no linear variable and no squares in the basis.
    #[must_use]
    pub fn generic(nvars: usize) -> Self {
        let nvars = nvars.max(1);
        Self {
            nvars,
            nlins: 0,
            linvars: vec![false; nvars - 1],
            lineqs: Vec::new(),
            squvars: vec![None; nvars - 1],
        }
    }

    /// Returns the layout with `squvars` replaced.
    ///
    /// # Errors
    ///
    /// Fails when `squvars` does not have `nvars - 1` entries.
    pub fn with_squares(mut self, squvars: Vec<Option<usize>>) -> Result<Self, FglmError> {
        if squvars.len() != self.nvars - 1 {
            return Err(invalid(format!(
                "squvars needs {} entries, got {}",
                self.nvars - 1,
                squvars.len()
            )));
        }
        self.squvars = squvars;
        Ok(self)
    }

    /// Number of variables, `t` included.
    #[must_use]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Number of linear equations.
    #[must_use]
    pub fn nlins(&self) -> usize {
        self.nlins
    }

    /// Linearity flags of `x_0..x_{n-2}`.
    #[must_use]
    pub fn linvars(&self) -> &[bool] {
        &self.linvars
    }

    /// Basis indices of the squares `x_i^2`.
    #[must_use]
    pub fn squvars(&self) -> &[Option<usize>] {
        &self.squvars
    }

    /// Row `r` of the linear equations.
    ///
    /// # Panics
    ///
    /// Panics if `r >= nlins`.
    #[must_use]
    pub fn lineq_row(&self, r: usize) -> &[u32] {
        let width = self.nvars + 1;
        &self.lineqs[r * width..(r + 1) * width]
    }

    /// True when every variable, `t` included, is given by an equation.
    #[must_use]
    pub fn all_linear(&self) -> bool {
        self.nlins == self.nvars
    }

    /// Variable indices of the linear coordinates, increasing.
    pub fn linear_coordinates(&self) -> impl Iterator<Item = usize> + '_ {
        self.linvars
            .iter()
            .enumerate()
            .filter_map(|(i, &l)| l.then_some(i))
    }

    /// Number of sequence columns: `t^i` plus one per non-linear coordinate.
    #[must_use]
    pub fn block_size(&self) -> usize {
        1 + self.linvars.iter().filter(|&&l| !l).count()
    }

    /// Non-linear coordinates in scan order, `x_{n-2}` first.
    #[must_use]
    pub fn tracked(&self) -> Vec<TrackedCoordinate> {
        (0..self.nvars - 1)
            .rev()
            .filter(|&i| !self.linvars[i])
            .enumerate()
            .map(|(j, coord)| TrackedCoordinate {
                coord,
                column: j + 1,
                basis_index: j + 2,
                square_index: self.squvars[coord],
            })
            .collect()
    }

    /// Checks the layout against a quotient of dimension `dim`.
    ///
    /// # Errors
    ///
    /// Fails when a tracked basis index is out of range, or when the
    /// all-linear shape is used with `dim != 1`.
    pub fn check_dimension(&self, dim: usize) -> Result<(), FglmError> {
        if self.all_linear() && dim != 1 {
            return Err(invalid(format!(
                "every variable is linear but the quotient has dimension {dim}"
            )));
        }
        for tc in self.tracked() {
            if tc.basis_index >= dim {
                return Err(invalid(format!(
                    "x_{} sits at basis index {} outside of [0, {dim})",
                    tc.coord, tc.basis_index
                )));
            }
            if let Some(sq) = tc.square_index.filter(|&sq| sq >= dim) {
                return Err(invalid(format!(
                    "x_{}^2 sits at basis index {sq} outside of [0, {dim})",
                    tc.coord
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> FglmError {
    FglmError::InvalidLayout(msg.into())
}
