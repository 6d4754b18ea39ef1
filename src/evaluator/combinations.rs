/// Iterator over every 5-element index subset of `0..n`, in lexicographic order.
///
/// Hold'em uses n = 7 (21 subsets); a partial board gives n = 5 or 6. For n < 5 the
/// iterator is empty.
pub struct ChooseFive {
    indices: [usize; 5],
    n: usize,
    done: bool,
}

impl ChooseFive {
    pub fn new(n: usize) -> Self {
        Self { indices: [0, 1, 2, 3, 4], n, done: n < 5 }
    }
}

impl Iterator for ChooseFive {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.indices;

        // Rightmost index that can still move right; everything after it resets behind it.
        match (0..5).rev().find(|&i| self.indices[i] < self.n - 5 + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(result)
    }
}
