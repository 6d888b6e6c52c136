//! Trains a two-layer perceptron on XOR.
//!
//! Run with `RUST_LOG=info cargo run -p spindle-optim --example xor_mlp`.

use log::info;
use spindle_core::nn::init::{xavier_uniform_, zeros_};
use spindle_core::{Graph, GraphConfig, Parameter, Source, SpindleError, Tensor};
use spindle_optim::{Adam, AdamConfig, Optimizer};

const HIDDEN: usize = 4;
const EPOCHS: usize = 1500;

fn main() -> Result<(), SpindleError> {
    env_logger::init();
    let source = Source::new(42);

    // Inputs carry a constant 1 column acting as the hidden-layer bias.
    let inputs = Tensor::matrix(
        4,
        3,
        vec![
            0.0, 0.0, 1.0, //
            0.0, 1.0, 1.0, //
            1.0, 0.0, 1.0, //
            1.0, 1.0, 1.0,
        ],
    )?;
    let targets = Tensor::matrix(4, 1, vec![0.0, 1.0, 1.0, 0.0])?;

    let w1 = Parameter::new("w1", Tensor::matrix(3, HIDDEN, vec![0.0; 3 * HIDDEN])?)?;
    let w2 = Parameter::new("w2", Tensor::matrix(HIDDEN, 1, vec![0.0; HIDDEN])?)?;
    let b2 = Parameter::new("b2", Tensor::scalar(0.0))?;
    xavier_uniform_(&w1, 1.0, &source)?;
    xavier_uniform_(&w2, 1.0, &source)?;
    zeros_(&b2)?;

    let mut optim = Adam::new(AdamConfig::default().with_lr(0.05))?;
    let mut graph = Graph::with_config(GraphConfig::default().with_release_after_backward(true));

    for epoch in 0..EPOCHS {
        let x = graph.constant(inputs.clone())?;
        let t = graph.constant(targets.clone())?;
        let (w1n, w2n, b2n) = (graph.param(&w1)?, graph.param(&w2)?, graph.param(&b2)?);

        let h = graph.matmul(x, w1n)?;
        let h = graph.tanh(h)?;
        let o = graph.matmul(h, w2n)?;
        let o = graph.add_scalar(o, b2n)?;
        let y = graph.sigmoid(o)?;
        let loss = graph.mse(y, t)?;

        let loss_value = graph.value(loss)?.item()?;
        if epoch % 100 == 0 {
            info!("epoch {:4}: loss {:.6}", epoch, loss_value);
        }

        graph.backward(loss, None)?;
        optim.step(graph.param_gradients())?;
        graph.clear();
    }

    // Final evaluation on a fresh graph.
    let mut eval = Graph::new();
    let x = eval.constant(inputs)?;
    let (w1n, w2n, b2n) = (eval.param(&w1)?, eval.param(&w2)?, eval.param(&b2)?);
    let h = eval.matmul(x, w1n)?;
    let h = eval.tanh(h)?;
    let o = eval.matmul(h, w2n)?;
    let o = eval.add_scalar(o, b2n)?;
    let y = eval.sigmoid(o)?;

    for (row, p) in eval.value(y)?.data().iter().enumerate() {
        println!("{:?} -> {:.4} (target {})", &[(row >> 1) & 1, row & 1], p, targets.data()[row]);
    }
    Ok(())
}
