use super::filter::check_fraction;
use super::DescriptionRow;
use crate::error::DatasetResult;
use log::info;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::BTreeMap;

/// Usage tag for training rows
pub const TRAIN: &str = "train";
/// Usage tag for held-out rows
pub const TEST: &str = "test";

/// Tag `round(test_fraction * len)` random rows `test` and the rest `train`
pub fn assign_random_split<R: Rng + ?Sized>(
    rows: &mut [DescriptionRow],
    test_fraction: f64,
    rng: &mut R,
) -> DatasetResult<()> {
    check_fraction("test_fraction", test_fraction)?;

    for row in rows.iter_mut() {
        row.usage = Some(TRAIN.to_string());
    }

    let amount = ((rows.len() as f64 * test_fraction).round() as usize).min(rows.len());
    for i in index::sample(rng, rows.len(), amount).into_vec() {
        rows[i].usage = Some(TEST.to_string());
    }

    info!("split {} rows: {} test", rows.len(), amount);
    Ok(())
}

/// Split rows into train and validation sets with per-class proportions.
///
/// Each `class_index` group is shuffled and `round(train_size * group_len)`
/// rows go to training. Both halves keep table order.
pub fn stratified_split<R: Rng + ?Sized>(
    rows: Vec<DescriptionRow>,
    train_size: f64,
    rng: &mut R,
) -> DatasetResult<(Vec<DescriptionRow>, Vec<DescriptionRow>)> {
    check_fraction("train_size", train_size)?;

    let mut groups: BTreeMap<Option<usize>, Vec<usize>> = BTreeMap::new();
    for (i, row) in rows.iter().enumerate() {
        groups.entry(row.class_index).or_default().push(i);
    }

    let mut in_train = vec![false; rows.len()];
    for members in groups.values_mut() {
        members.shuffle(rng);
        let take = (members.len() as f64 * train_size).round() as usize;
        for &i in members.iter().take(take) {
            in_train[i] = true;
        }
    }

    let (train, validation): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .zip(in_train)
        .partition(|(_, train)| *train);

    Ok((
        train.into_iter().map(|(row, _)| row).collect(),
        validation.into_iter().map(|(row, _)| row).collect(),
    ))
}
