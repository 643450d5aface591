use crate::core::Result;
use std::fmt::Debug;
use std::path::Path;

/// Fitted binary classifier consuming standardized inputs.
pub trait Classifier: Debug + Send + Sync {
    /// Resource the fitted parameters were read from.
    fn source(&self) -> &Path;

    fn input_width(&self) -> usize;

    /// Class codes, in the order [`predict_proba`](Self::predict_proba) reports them.
    fn classes(&self) -> [u8; 2];

    fn predict_proba(&self, input: &[f64]) -> Result<[f64; 2]>;

    /// Class code with the larger probability; a tie goes to the lower code.
    ///
    /// Models with a decision function should decide on it instead.
    fn predict(&self, input: &[f64]) -> Result<u8> {
        let p = self.predict_proba(input)?;
        let classes = self.classes();
        let winner = if p[0] == p[1] {
            if classes[0] < classes[1] { 0 } else { 1 }
        } else if p[0] > p[1] {
            0
        } else {
            1
        };
        Ok(classes[winner])
    }
}
