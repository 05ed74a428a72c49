#[cfg(test)]
pub mod common;



#[cfg(test)]
mod test_evolution;


#[cfg(test)]
mod test_loader;
