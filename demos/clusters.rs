use ferrite_rbm::{Rbm, TrainingSet};

fn main() -> ferrite_rbm::Result<()> {
    let data = TrainingSet::new(
        vec![
            vec![1, 1, 1, 0, 0, 0],
            vec![1, 0, 1, 0, 0, 0],
            vec![1, 1, 1, 0, 0, 0],
            vec![0, 0, 0, 1, 1, 1],
            vec![0, 0, 0, 1, 0, 1],
            vec![0, 0, 0, 1, 1, 1],
        ],
        6,
    )?;

    let mut rbm = Rbm::with_seed(6, 2, 0.1, 42)?;

    for round in 0..10 {
        if let Some(stats) = rbm.train(&data, 500)? {
            let epoch = (round + 1) * 500;
            println!("Epoch {epoch}: reconstruction error = {:.4}", stats.reconstruction_error);
        }
    }

    for x in data.iter() {
        println!("Input: {:?} -> Reconstruction: {:?}", x, rbm.reconstruct(x));
    }
    Ok(())
}
