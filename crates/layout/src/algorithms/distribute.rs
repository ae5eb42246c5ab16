//! Flex distribution.
//!
//! Sizes are handed out in whole pixels by largest remainder: every item gets the floor of
//! its exact share, then the pixels left over go to the items with the largest fractional
//! parts, earliest item first on ties. A fractional amount of space that cannot be split
//! into whole pixels goes to the first item. A claim with a fractional floor is never
//! rounded under it. The result always sums to the space given.

/// One flexible child's stake in the space left on a container's main axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexClaim {
    pub weight: f32,
    /// The child never receives less than this.
    pub floor: f32,
}

impl FlexClaim {
    pub fn new(weight: f32, floor: f32) -> Self {
        Self { weight, floor }
    }
}

/// Shares `space` between `claims` in proportion to their weights.
///
/// A claim whose share would fall under its floor is frozen at the floor and the rest is
/// shared again among the remaining claims, until no share violates a floor. When the
/// floors alone exceed `space` every claim gets its floor and the total overflows.
pub fn distribute(space: f32, claims: &[FlexClaim]) -> Vec<f32> {
    let mut sizes = vec![0.0f64; claims.len()];
    let mut frozen = vec![false; claims.len()];
    let mut remaining = f64::from(space.max(0.0));

    // Weightless claims never grow past their floor.
    for (i, claim) in claims.iter().enumerate() {
        if claim.weight <= 0.0 {
            frozen[i] = true;
            sizes[i] = f64::from(claim.floor.max(0.0));
            remaining -= sizes[i];
        }
    }

    loop {
        let active_weight: f64 = claims
            .iter()
            .zip(&frozen)
            .filter(|(_, frozen)| !**frozen)
            .map(|(claim, _)| f64::from(claim.weight))
            .sum();
        if active_weight <= 0.0 {
            break;
        }

        let mut violated = false;
        let available = remaining.max(0.0);
        for (i, claim) in claims.iter().enumerate() {
            if frozen[i] {
                continue;
            }
            let share = available * f64::from(claim.weight) / active_weight;
            let floor = f64::from(claim.floor.max(0.0));
            if share < floor {
                frozen[i] = true;
                sizes[i] = floor;
                remaining -= floor;
                violated = true;
            }
        }
        if !violated {
            break;
        }
    }

    let open: Vec<usize> = (0..claims.len()).filter(|i| !frozen[*i]).collect();
    let weights: Vec<f32> = open.iter().map(|i| claims[*i].weight).collect();
    let shares = apportion(remaining.max(0.0) as f32, &weights);
    for (i, share) in open.iter().zip(shares) {
        sizes[*i] = f64::from(share);
    }
    restore_floors(&mut sizes, claims, &open);
    sizes.into_iter().map(|s| s as f32).collect()
}

/// Lifts open claims that rounding left under a fractional floor back onto it.
///
/// Every open claim's exact share is at least its floor, so the pixels rounding moved
/// around always cover the deficit. Surplus is taken from the last claims first.
fn restore_floors(sizes: &mut [f64], claims: &[FlexClaim], open: &[usize]) {
    let mut deficit = 0.0;
    for i in open {
        let floor = f64::from(claims[*i].floor.max(0.0));
        if sizes[*i] < floor {
            deficit += floor - sizes[*i];
            sizes[*i] = floor;
        }
    }
    for i in open.iter().rev() {
        if deficit <= 0.0 {
            break;
        }
        let surplus = sizes[*i] - f64::from(claims[*i].floor.max(0.0));
        let taken = surplus.min(deficit);
        if taken > 0.0 {
            sizes[*i] -= taken;
            deficit -= taken;
        }
    }
}

/// Splits `space` in proportion to `weights` with whole-pixel largest-remainder rounding.
///
/// All-zero weights split evenly.
pub fn apportion(space: f32, weights: &[f32]) -> Vec<f32> {
    if weights.is_empty() {
        return Vec::new();
    }
    let total = f64::from(space.max(0.0));
    let mut total_weight: f64 = weights.iter().map(|w| f64::from(w.max(0.0))).sum();
    let even = total_weight <= 0.0;
    if even {
        total_weight = weights.len() as f64;
    }

    let whole = total.floor();
    let mut sizes = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for weight in weights {
        let weight = if even { 1.0 } else { f64::from(weight.max(0.0)) };
        let exact = whole * weight / total_weight;
        let floor = exact.floor();
        sizes.push(floor);
        remainders.push(exact - floor);
    }

    let assigned: f64 = sizes.iter().sum();
    let leftover = (whole - assigned).round().max(0.0) as usize;
    let mut order: Vec<usize> = (0..weights.len()).collect();
    // Stable sort keeps document order between equal remainders.
    order.sort_by(|a, b| remainders[*b].total_cmp(&remainders[*a]));
    for i in order.into_iter().cycle().take(leftover) {
        sizes[i] += 1.0;
    }
    sizes[0] += total - whole;

    sizes.into_iter().map(|s| s as f32).collect()
}
