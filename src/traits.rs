use crate::error::DropoutError;
use crate::neural_network::{Phase, Tensor};

/// Defines the contract an enclosing computation graph uses to drive a layer.
///
/// Setup happens at construction time. After that the graph calls
/// `adapt_shape` whenever the input shape may have changed, then one
/// `forward` followed by one or more `backward` calls.
pub trait Layer {
    /// Adapts internal caches to the shape of the next input.
    ///
    /// # Parameters
    ///
    /// * `input_shape` - Full shape of the upcoming input, batch axis first
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The layer is ready for a forward pass with this shape
    /// - `Err(DropoutError)` - If the shape has no batch axis
    fn adapt_shape(&mut self, input_shape: &[usize]) -> Result<(), DropoutError>;

    /// Performs forward propagation through the layer.
    ///
    /// # Parameters
    ///
    /// - `input` - The input tensor to the layer
    /// - `phase` - Whether the graph is training or running inference
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - The output tensor after forward computation
    /// - `Err(DropoutError)` - If the input does not match the adapted shape
    fn forward(&mut self, input: &Tensor, phase: Phase) -> Result<Tensor, DropoutError>;

    /// Performs backward propagation through the layer.
    ///
    /// # Parameters
    ///
    /// - `grad_output` - The gradient tensor from the next layer
    /// - `propagate_down` - Whether the gradient should reach this layer's input at all
    /// - `grad_input` - Buffer receiving the gradient with respect to the input
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The gradient was written, or skipped because `propagate_down` is false
    /// - `Err(DropoutError)` - If no matching forward pass exists or shapes disagree
    fn backward(
        &mut self,
        grad_output: &Tensor,
        propagate_down: bool,
        grad_input: &mut Tensor,
    ) -> Result<(), DropoutError>;

    /// Returns the type name of the layer (e.g. "Dropout").
    fn layer_type(&self) -> &str;

    /// Returns a description of the output shape of the layer.
    fn output_shape(&self) -> String;
}
