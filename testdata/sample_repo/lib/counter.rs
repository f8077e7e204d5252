pub struct Counter {
    count: u32,
}

impl Counter {
    pub fn new() -> Self {
        Counter { count: 0 }
    }

    pub fn increment(&mut self) {
        self.count += 1;
    }
}

pub fn run() -> u32 {
    let mut c = Counter::new();
    c.increment();
    c.count
}
