use crate::autograd::backward_op::Adjoint;
use crate::autograd::matrix_func::MatrixMatrixFunc;
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use log::{debug, trace};

/// Propagates `seed` from `root` down to the variable and returns the
/// accumulated derivative.
///
/// The walk is depth-first, left input before right, and follows every path:
/// a node shared by two sub-expressions is visited once per use. Constant
/// subtrees are skipped. Returns `None` when no path reaches the variable.
pub(crate) fn backward_pass<M: MatrixAdaptor>(
    root: &MatrixMatrixFunc<M>,
    seed: Adjoint<M>,
) -> Result<Option<M>, AmdError> {
    debug!(
        "Backward pass from {:?} node ({} nodes)",
        root.op(),
        root.num_nodes()
    );
    let mut result = None;
    propagate(root, seed, &mut result)?;
    Ok(result)
}

/// Like [`backward_pass`], with a zero matrix of the variable's shape when
/// nothing contributes.
pub(crate) fn gradient<M: MatrixAdaptor>(
    root: &MatrixMatrixFunc<M>,
    seed: Adjoint<M>,
) -> Result<M, AmdError> {
    let (rows, cols) = root.var_shape();
    Ok(backward_pass(root, seed)?.unwrap_or_else(|| M::zeros(rows, cols)))
}

fn accumulate<M: MatrixAdaptor>(result: &mut Option<M>, contribution: M) -> Result<(), AmdError> {
    *result = Some(match result.take() {
        None => contribution,
        Some(acc) => acc.add(&contribution)?,
    });
    Ok(())
}

fn propagate<M: MatrixAdaptor>(
    node: &MatrixMatrixFunc<M>,
    adjoint: Adjoint<M>,
    result: &mut Option<M>,
) -> Result<(), AmdError> {
    if node.is_const() {
        return Ok(());
    }
    let grad_fn = match node.grad_fn() {
        Some(grad_fn) => grad_fn,
        None => {
            trace!("Variable reached, transposed = {}", adjoint.transposed);
            return accumulate(result, adjoint.materialize());
        }
    };

    let inputs = grad_fn.inputs();
    let adjoints = grad_fn.backward(&adjoint)?;
    if inputs.len() != adjoints.len() {
        return Err(AmdError::InternalError(format!(
            "{:?} backward returned {} adjoints for {} inputs",
            node.op(),
            adjoints.len(),
            inputs.len()
        )));
    }
    trace!("Propagating through {:?} node", node.op());
    for (input, input_adjoint) in inputs.iter().zip(adjoints) {
        propagate(input, input_adjoint, result)?;
    }
    if let Some(extra) = grad_fn.scalar_contribution(&adjoint)? {
        accumulate(result, extra)?;
    }
    Ok(())
}
