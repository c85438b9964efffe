use std::cmp::Ordering;
use std::iter::{Skip,StepBy};

pub fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

pub fn divisors(n: usize) -> impl Iterator<Item=usize> {
    (1..=n).filter(move |d| n % d == 0)
}

#[cfg(test)]
pub fn approx_equal(target: f64, result: f64) -> bool {
    (result - target).abs() < std::f64::EPSILON
}

pub fn fcmp(x: f64, y: f64) -> Ordering {
    if x.is_nan() || y.is_nan() {
        panic!("Encountered NaN while comparing floats");
    } else if x > y {
        Ordering::Greater
    } else if y > x {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

pub trait Average {
    fn average(self) -> f64;
}

impl<TI> Average for TI
where TI: Iterator<Item=f64> {
    fn average(self) -> f64 {
        let (sum,len) = self.fold((0.0,0.0), |(s,l),x| (s+x,l+1.0));
        if len == 0.0 { 0.0 } else { sum / len }
    }
}

//Strict comparisons against the running best, so the earliest
//element wins a tie. Scans are in ascending order, which makes
//"earliest" mean "smallest".
pub trait FirstBest<T> : Iterator<Item=T>+Sized {
    fn first_min_by_score(self, f: impl Fn(&T) -> f64) -> Option<T> {
        self.fold(None, |best:Option<(T,f64)>,x| {
            let s = f(&x);
            match best {
                Some((b,bs)) if fcmp(s,bs) != Ordering::Less => Some((b,bs)),
                _ => Some((x,s))
            }
        }).map(|(b,_)| b)
    }

    fn first_max_by_score(self, f: impl Fn(&T) -> f64) -> Option<T> {
        self.first_min_by_score(|x| -f(x))
    }
}

impl<T,TI> FirstBest<T> for TI where TI: Iterator<Item=T> {}

//Splits a sequence into m interleaved columns,
//column r holding the elements at positions = r (mod m)
pub trait UnzipN : Sized+Clone {
    fn unzipn(self, m: usize) -> Vec<StepBy<Skip<Self>>>;
}

impl<T,TI> UnzipN for TI
where TI: Iterator<Item=T>+Sized+Clone {
    fn unzipn(self, m: usize) -> Vec<StepBy<Skip<TI>>> {
        (0..m)
        .map(|r|
            self
            .clone() //Need to construct m iterators from one
            .skip(r)
            .step_by(m)
        ).collect()
    }
}

pub fn columns(letters: &[u8], m: usize) -> Vec<Vec<u8>> {
    letters
    .iter()
    .cloned()
    .unzipn(m)
    .into_iter()
    .map(|column| column.collect())
    .collect()
}

//Like `columns`, but each letter goes to column `positions[i] % m`
pub fn columns_at(letters: &[u8], positions: &[usize], m: usize) -> Vec<Vec<u8>> {
    let mut out = vec![Vec::new(); m];
    for (&x,&pos) in letters.iter().zip(positions) {
        out[pos % m].push(x);
    }
    out
}
