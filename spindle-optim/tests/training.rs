use spindle_core::nn::init::xavier_uniform_;
use spindle_core::{Graph, Parameter, Source, SpindleError, Tensor};
use spindle_optim::{Adam, AdamConfig, Optimizer, Sgd, SgdConfig};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One forward/backward/step cycle of `mse(x . w, y)`; returns the loss.
fn train_step<O: Optimizer>(
    graph: &mut Graph,
    optim: &mut O,
    w: &Parameter,
    x: &Tensor,
    y: &Tensor,
) -> Result<f64, SpindleError> {
    let xn = graph.constant(x.clone())?;
    let yn = graph.constant(y.clone())?;
    let wn = graph.param(w)?;
    let pred = graph.matmul(xn, wn)?;
    let loss = graph.mse(pred, yn)?;
    let value = graph.value(loss)?.item()?;
    graph.backward(loss, None)?;
    optim.step(graph.param_gradients())?;
    graph.clear();
    Ok(value)
}

fn regression_data() -> (Tensor, Tensor) {
    // y = 2 * x0 - 3 * x1
    let x = Tensor::matrix(4, 2, vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, -1.0]).unwrap();
    let y = Tensor::matrix(4, 1, vec![2.0, -3.0, -1.0, 7.0]).unwrap();
    (x, y)
}

#[test]
fn test_sgd_fits_linear_regression() {
    init_logger();
    let (x, y) = regression_data();
    let w = Parameter::new("w", Tensor::matrix(2, 1, vec![0.0, 0.0]).unwrap()).unwrap();
    let mut optim = Sgd::new(SgdConfig::default().with_lr(0.1).with_momentum(0.5)).unwrap();
    let mut graph = Graph::new();

    let first = train_step(&mut graph, &mut optim, &w, &x, &y).unwrap();
    let mut last = first;
    for _ in 0..300 {
        last = train_step(&mut graph, &mut optim, &w, &x, &y).unwrap();
    }
    assert!(last < first * 1e-6, "loss went from {} to {}", first, last);
    let fitted = w.value().to_vec();
    assert!((fitted[0] - 2.0).abs() < 1e-3 && (fitted[1] + 3.0).abs() < 1e-3, "{:?}", fitted);
}

#[test]
fn test_adam_reduces_loss_from_seeded_init() {
    init_logger();
    let (x, y) = regression_data();
    let source = Source::new(42);
    let w = Parameter::new("w", Tensor::matrix(2, 1, vec![0.0, 0.0]).unwrap()).unwrap();
    xavier_uniform_(&w, 1.0, &source).unwrap();
    let mut optim = Adam::new(AdamConfig::default().with_lr(0.05)).unwrap();
    let mut graph = Graph::new();

    let first = train_step(&mut graph, &mut optim, &w, &x, &y).unwrap();
    let mut last = first;
    for _ in 0..400 {
        last = train_step(&mut graph, &mut optim, &w, &x, &y).unwrap();
    }
    assert!(last < first * 0.01, "loss went from {} to {}", first, last);
}
